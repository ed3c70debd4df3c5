use std::str::FromStr;

use log::{debug, error, info, warn};

use crate::{
    board::Cell,
    catalog::PuzzleCatalog,
    game_state::{GameState, Mode},
    position::Position,
    presenter::{Cue, Presenter},
    scores::read_scores,
};

/// Commands the board shell can send besides tile activations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Undo,
    SavePuzzle,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Command::Undo),
            "save puzzle" => Ok(Command::SavePuzzle),
            _ => Err(format!("Unknown command '{s}'")),
        }
    }
}

/// What a tile activation led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileOutcome {
    NoGame,
    Invalid,
    Moved,
    NextLevel,
    GameOver,
}

/// Owns the current game and the puzzle catalog, and keeps the presenter in
/// step with both.
pub struct Controller<P: Presenter> {
    catalog: PuzzleCatalog,
    presenter: P,
    state: Option<GameState>,
    start_level: u8,
}

impl<P: Presenter> Controller<P> {
    pub fn new(catalog: PuzzleCatalog, presenter: P) -> Self {
        Controller {
            catalog,
            presenter,
            state: None,
            start_level: 0,
        }
    }

    /// Level that new games start at.
    pub fn with_start_level(mut self, level: u8) -> Self {
        self.start_level = level;
        self
    }

    pub fn start_new_game(&mut self) {
        info!("New game");
        let mut state = GameState::new(Mode::Capture);
        state.set_level(self.start_level);
        state.initialize_game(&mut self.catalog);

        self.presenter.clear();
        self.presenter.render_state(&state);
        self.presenter.install_handler();
        self.presenter.advance_level(state.level());
        self.state = Some(state);
        self.update_status();
    }

    pub fn create_puzzle(&mut self) {
        info!("Create puzzle");
        let mut state = GameState::new(Mode::Release);
        state.initialize_game(&mut self.catalog);

        self.presenter.clear();
        self.presenter.render_state(&state);
        self.presenter.install_handler();
        self.presenter.initialize_level();
        self.state = Some(state);
        self.update_status();
    }

    /// Loads a puzzle for the next level. Returns false at the last level.
    pub fn advance_next_level(&mut self) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        if !state.advance_level() {
            info!("Already at the last level {}", state.level());
            return false;
        }

        info!("Advancing to level {}", state.level());
        state.initialize_game(&mut self.catalog);

        self.presenter.clear();
        self.presenter.render_state(state);
        self.presenter.install_handler();
        self.presenter.advance_level(state.level());
        self.update_status();
        true
    }

    pub fn dispatch(&mut self, command: &str) {
        match command.parse::<Command>() {
            Ok(Command::Undo) => self.undo(),
            Ok(Command::SavePuzzle) => self.save_puzzle(),
            Err(e) => warn!("{e}"),
        }
    }

    pub fn update_status(&mut self) {
        if let Some(state) = &self.state {
            self.presenter.update_status(&state.status_line());
        }
    }

    /// Handles a click on the tile at `pos`.
    pub fn activate_tile(&mut self, pos: Position) -> TileOutcome {
        let Some(state) = self.state.as_mut() else {
            return TileOutcome::NoGame;
        };
        debug!("Tile activated at ({}, {})", pos.x, pos.y);

        state.add_clicks();
        self.presenter.update_status(&state.status_line());

        if !state.is_valid_move(pos) {
            self.presenter.play_cue(Cue::InvalidMove);
            return TileOutcome::Invalid;
        }

        state.add_moves();
        self.presenter.update_status(&state.status_line());

        let vacated = match state.mode() {
            Mode::Capture => Cell::Empty,
            Mode::Release => Cell::Pawn,
        };
        self.presenter.draw_move(state.bishop(), pos, vacated);

        if let Err(e) = state.move_position(pos) {
            error!("Move was checked but still refused: {e}");
            return TileOutcome::Invalid;
        }
        self.presenter.play_cue(Cue::Capture);

        if !state.is_game_over() {
            return TileOutcome::Moved;
        }

        if self.advance_next_level() {
            self.presenter.play_cue(Cue::NextLevel);
            TileOutcome::NextLevel
        } else {
            self.finish_game();
            TileOutcome::GameOver
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    fn undo(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.undo();
        self.presenter.undo(state);
        self.presenter.play_cue(Cue::Undo);
        self.update_status();
    }

    fn save_puzzle(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let written = state.save(&mut self.catalog);
        for id in &written {
            debug!("Wrote puzzle {id}");
        }
    }

    fn finish_game(&mut self) {
        info!("Game over");
        self.presenter.play_cue(Cue::GameOver);

        let scores = match read_scores(&self.catalog.dataset().score_path()) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("No leaderboard to show: {e}");
                Vec::new()
            }
        };
        let final_status = self.state.as_ref().map(GameState::status_line).unwrap_or_default();
        self.presenter.show_scores(&scores, &final_status);
        self.presenter.close();
    }
}

#[cfg(test)]
mod controller_tests {
    use crate::{
        dataset::{Dataset, scratch_dataset},
        game_state::MAX_LEVEL,
        puzzle_file::{IndexMap, PuzzleId, format_index},
        scores::ScoreEntry,
    };

    use super::*;

    #[derive(Default)]
    struct RecordingPresenter {
        calls: Vec<String>,
        cues: Vec<Cue>,
        status: String,
        scores: Vec<ScoreEntry>,
        closed: bool,
    }

    impl Presenter for RecordingPresenter {
        fn clear(&mut self) {
            self.calls.push(String::from("clear"));
        }

        fn render_state(&mut self, state: &GameState) {
            self.calls.push(format!("render {}", state.pawn_count()));
        }

        fn install_handler(&mut self) {
            self.calls.push(String::from("install"));
        }

        fn advance_level(&mut self, level: u8) {
            self.calls.push(format!("level {level}"));
        }

        fn initialize_level(&mut self) {
            self.calls.push(String::from("hide levels"));
        }

        fn update_status(&mut self, text: &str) {
            self.status = text.to_string();
        }

        fn undo(&mut self, state: &GameState) {
            self.calls.push(format!("undo {:?}", state.bishop()));
        }

        fn draw_move(&mut self, from: Option<Position>, to: Position, vacated: Cell) {
            self.calls.push(format!("draw {from:?} {:?} {vacated:?}", to));
        }

        fn play_cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }

        fn show_scores(&mut self, scores: &[ScoreEntry], _final_status: &str) {
            self.scores = scores.to_vec();
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    const S1_PUZZLE: &str = "4 2\n6 4\n5 5\n1 1\n";
    const ONE_PAWN_PUZZLE: &str = "0 0\n3 3\n";

    fn s1_dataset(name: &str) -> Dataset {
        let dataset = scratch_dataset(name);
        std::fs::write(dataset.puzzle_path(PuzzleId::new(4, 1)), S1_PUZZLE).unwrap();
        std::fs::write(dataset.index_path(), format_index(&IndexMap::from([(4, 1)]))).unwrap();
        dataset
    }

    fn controller(dataset: Dataset) -> Controller<RecordingPresenter> {
        Controller::new(PuzzleCatalog::with_seed(dataset, 17), RecordingPresenter::default())
    }

    #[test]
    pub fn command_names() {
        assert_eq!(Ok(Command::Undo), "undo".parse::<Command>());
        assert_eq!(Ok(Command::SavePuzzle), "save puzzle".parse::<Command>());
        assert!("save".parse::<Command>().is_err());
    }

    #[test]
    pub fn new_game_renders_a_loaded_puzzle() {
        let mut controller = controller(s1_dataset("new_game_renders_a_loaded_puzzle"));
        controller.start_new_game();

        assert_eq!(vec!["clear", "render 3", "install", "level 0"], controller.presenter().calls);
        assert_eq!(
            "Puzzle: 04-0001        Score: 0        # of Clicks / Moves / Undos : 0 / 0 / 0",
            controller.presenter().status
        );
    }

    #[test]
    pub fn tile_before_any_game_does_nothing() {
        let mut controller = controller(s1_dataset("tile_before_any_game_does_nothing"));

        assert_eq!(TileOutcome::NoGame, controller.activate_tile(Position::new(0, 0)));
        assert!(controller.presenter().calls.is_empty());
    }

    #[test]
    pub fn invalid_click_only_counts_the_click() {
        let mut controller = controller(s1_dataset("invalid_click_only_counts_the_click"));
        controller.start_new_game();

        assert_eq!(TileOutcome::Invalid, controller.activate_tile(Position::new(4, 4)));

        let state = controller.state().unwrap();
        assert_eq!(1, state.clicks());
        assert_eq!(0, state.moves());
        assert_eq!(Some(Position::new(4, 2)), state.bishop());
        assert_eq!(vec![Cue::InvalidMove], controller.presenter().cues);
        assert!(controller.presenter().status.contains("Score: 1"));
    }

    #[test]
    pub fn capture_click_draws_and_moves() {
        let mut controller = controller(s1_dataset("capture_click_draws_and_moves"));
        controller.start_new_game();

        assert_eq!(TileOutcome::Moved, controller.activate_tile(Position::new(6, 4)));

        let state = controller.state().unwrap();
        assert_eq!(Some(Position::new(6, 4)), state.bishop());
        assert_eq!(2, state.pawn_count());
        assert_eq!(
            Some(&String::from("draw Some(Position { x: 4, y: 2 }) Position { x: 6, y: 4 } Empty")),
            controller.presenter().calls.last()
        );
        assert_eq!(vec![Cue::Capture], controller.presenter().cues);
        assert!(controller.presenter().status.contains("1 / 1 / 0"));
    }

    #[test]
    pub fn undo_command_reverts_and_counts() {
        let mut controller = controller(s1_dataset("undo_command_reverts_and_counts"));
        controller.start_new_game();
        controller.activate_tile(Position::new(6, 4));
        controller.dispatch("undo");

        let state = controller.state().unwrap();
        assert_eq!(Some(Position::new(4, 2)), state.bishop());
        assert_eq!(1, state.undos());
        assert_eq!(Some(&Cue::Undo), controller.presenter().cues.last());
        // 1 move, 1 click, 1 undo
        assert!(controller.presenter().status.contains("Score: 3"));
    }

    #[test]
    pub fn unknown_command_is_ignored() {
        let mut controller = controller(s1_dataset("unknown_command_is_ignored"));
        controller.start_new_game();
        controller.dispatch("teleport");

        assert_eq!(0, controller.state().unwrap().undos());
        assert!(controller.presenter().cues.is_empty());
    }

    #[test]
    pub fn clearing_the_board_advances_the_level() {
        let mut controller = controller(s1_dataset("clearing_the_board_advances_the_level"));
        controller.start_new_game();
        controller.activate_tile(Position::new(6, 4));
        controller.activate_tile(Position::new(5, 5));

        assert_eq!(TileOutcome::NextLevel, controller.activate_tile(Position::new(1, 1)));

        let state = controller.state().unwrap();
        assert_eq!(1, state.level());
        // Counters carry across levels
        assert_eq!(3, state.moves());
        assert_eq!(Some(&Cue::NextLevel), controller.presenter().cues.last());
        assert_eq!(Some(&String::from("level 1")), controller.presenter().calls.last());
        // No level 1 puzzle in the index, so the board is empty
        assert_eq!(None, state.bishop());
        assert_eq!("", state.puzzle_name());
        assert!(controller.presenter().status.starts_with("Puzzle:         Score: 15"));
    }

    #[test]
    pub fn clearing_the_last_level_ends_the_game() {
        let dataset = scratch_dataset("clearing_the_last_level_ends_the_game");
        for pawn_count in [18, 19] {
            std::fs::write(dataset.puzzle_path(PuzzleId::new(pawn_count, 1)), ONE_PAWN_PUZZLE).unwrap();
        }
        std::fs::write(dataset.index_path(), format_index(&IndexMap::from([(18, 1), (19, 1)]))).unwrap();
        std::fs::create_dir_all(dataset.score_path().parent().unwrap()).unwrap();
        std::fs::write(dataset.score_path(), "# name,score,clicks,moves,undos\nAda,9,1,2,0\n").unwrap();

        let mut controller = controller(dataset).with_start_level(MAX_LEVEL);
        controller.start_new_game();

        assert_eq!(TileOutcome::GameOver, controller.activate_tile(Position::new(3, 3)));
        assert_eq!(MAX_LEVEL, controller.state().unwrap().level());
        assert_eq!(vec![Cue::Capture, Cue::GameOver], controller.presenter().cues);
        assert_eq!(1, controller.presenter().scores.len());
        assert!(controller.presenter().closed);
    }

    #[test]
    pub fn create_and_save_a_puzzle() {
        let dataset = scratch_dataset("create_and_save_a_puzzle");
        let mut controller = controller(dataset.clone());
        controller.create_puzzle();

        assert_eq!(Some(&String::from("hide levels")), controller.presenter().calls.last());

        for (x, y) in [(0, 0), (2, 2), (4, 4), (6, 6), (1, 1)] {
            assert_eq!(TileOutcome::Moved, controller.activate_tile(Position::new(x, y)));
        }
        assert_eq!(
            Some(&String::from("draw Some(Position { x: 6, y: 6 }) Position { x: 1, y: 1 } Pawn")),
            controller.presenter().calls.last()
        );

        controller.dispatch("save puzzle");
        controller.dispatch("save puzzle");

        assert!(dataset.puzzle_path(PuzzleId::new(4, 1)).exists());
        assert!(!dataset.puzzle_path(PuzzleId::new(4, 2)).exists());
        let state = controller.state().unwrap();
        assert_eq!(4, state.pawn_count());
        assert!(!state.is_game_over());
    }
}
