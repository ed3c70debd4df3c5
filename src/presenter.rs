use crate::{board::Cell, game_state::GameState, position::Position, scores::ScoreEntry};

/// Short sounds the shell plays in response to play events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Capture,
    InvalidMove,
    Undo,
    NextLevel,
    GameOver,
}

/// What the controller needs from whatever draws the board.
///
/// Implementations only read the state they are given. All calls happen on
/// the thread that owns the controller.
pub trait Presenter {
    /// Wipes the board and stops routing tile activations.
    fn clear(&mut self);

    fn render_state(&mut self, state: &GameState);

    /// Starts routing tile activations to the controller.
    fn install_handler(&mut self);

    /// Shows the level indicators up to `level`.
    fn advance_level(&mut self, level: u8);

    /// Hides the level indicators; used while building a puzzle.
    fn initialize_level(&mut self);

    fn update_status(&mut self, text: &str);

    /// Repaints after the state has taken back a move.
    fn undo(&mut self, state: &GameState);

    /// Repaints the square the bishop leaves with `vacated` and draws the
    /// bishop on `to`.
    fn draw_move(&mut self, from: Option<Position>, to: Position, vacated: Cell);

    fn play_cue(&mut self, cue: Cue);

    /// Shows the leaderboard and the player's final status line.
    fn show_scores(&mut self, scores: &[ScoreEntry], final_status: &str);

    /// Ends the session, for example by closing the board window.
    fn close(&mut self);
}
