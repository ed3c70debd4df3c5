use std::fmt::Display;

use log::{trace, warn};

use crate::{
    board::Board,
    catalog::PuzzleCatalog,
    errors::PuzzleError,
    history::History,
    position::Position,
    puzzle_file::PuzzleId,
};

/// Highest zero-indexed level, nine levels in total.
pub const MAX_LEVEL: u8 = 8;
pub const DEFAULT_PUZZLE_NAME: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Play: the bishop captures every pawn.
    Capture,
    /// Create: every bishop move leaves a pawn behind.
    Release,
}

/// One game or one puzzle under construction.
///
/// The mode is fixed at construction and selects the rules used by
/// `is_valid_move`, `move_position`, `undo` and `save`. The board is always
/// derived from the bishop square and the pawn list. In capture mode the pawn
/// list is the set loaded from the puzzle file and captures only lower
/// `pawn_count`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) mode: Mode,
    pub(crate) bishop: Option<Position>,
    pub(crate) pawns: Vec<Position>,
    pub(crate) pawn_count: usize,
    pub(crate) history: History,
    pub(crate) board: Board,
    clicks: u32,
    moves: u32,
    pub(crate) undos: u32,
    level: u8,
    pub(crate) puzzle_name: String,
    pub(crate) is_board_saved: bool,
}

impl GameState {
    pub fn new(mode: Mode) -> Self {
        GameState {
            mode,
            bishop: None,
            pawns: Vec::new(),
            pawn_count: 0,
            history: History::default(),
            board: Board::default(),
            clicks: 0,
            moves: 0,
            undos: 0,
            level: 0,
            puzzle_name: String::from(DEFAULT_PUZZLE_NAME),
            is_board_saved: false,
        }
    }

    /// Empties the board and, in capture mode, loads a puzzle for the current
    /// level. A missing puzzle leaves the board empty.
    pub fn initialize_game(&mut self, catalog: &mut PuzzleCatalog) {
        self.board.clear();
        self.history.clear();
        self.bishop = None;
        self.pawns.clear();
        self.pawn_count = 0;

        match self.mode {
            Mode::Capture => self.load_from_catalog(catalog),
            Mode::Release => self.is_board_saved = false,
        }

        trace!("Initialized game\n{self}");
    }

    pub fn is_valid_move(&self, pos: Position) -> bool {
        match self.mode {
            Mode::Capture => self.capture_is_valid_move(pos),
            Mode::Release => self.release_is_valid_move(pos),
        }
    }

    /// Moves the bishop to `pos`. Illegal targets are refused and leave the
    /// state untouched.
    pub fn move_position(&mut self, pos: Position) -> Result<(), PuzzleError> {
        if !self.is_valid_move(pos) {
            return Err(PuzzleError::InvalidMove(pos));
        }

        match self.mode {
            Mode::Capture => self.capture_move(pos),
            Mode::Release => self.release_move(pos),
        }

        trace!("After move to ({}, {})\n{self}", pos.x, pos.y);
        Ok(())
    }

    pub fn undo(&mut self) {
        match self.mode {
            Mode::Capture => self.capture_undo(),
            Mode::Release => self.release_undo(),
        }

        trace!("After undo\n{self}");
    }

    /// Stores the construction as puzzle files. Only release mode has
    /// anything to save. Returns the files written.
    pub fn save(&mut self, catalog: &mut PuzzleCatalog) -> Vec<PuzzleId> {
        match self.mode {
            Mode::Capture => {
                warn!("Nothing to save while playing a puzzle");
                Vec::new()
            }
            Mode::Release => self.release_save(catalog),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.mode == Mode::Capture && self.pawn_count == 0 && !self.pawns.is_empty()
    }

    /// Moves to the next level. Returns false when already at the last one.
    pub fn advance_level(&mut self) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }

        self.level += 1;
        true
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_LEVEL);
    }

    pub fn add_clicks(&mut self) {
        self.clicks += 1;
    }

    pub fn add_moves(&mut self) {
        self.moves += 1;
    }

    pub fn score(&self) -> i64 {
        self.moves as i64 * 4 + self.clicks as i64 - self.undos as i64 * 2
    }

    pub fn status_line(&self) -> String {
        format!(
            "Puzzle: {}        Score: {}        # of Clicks / Moves / Undos : {} / {} / {}",
            self.puzzle_name,
            self.score(),
            self.clicks,
            self.moves,
            self.undos
        )
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bishop(&self) -> Option<Position> {
        self.bishop
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

#[cfg(test)]
impl GameState {
    pub fn pawns(&self) -> &[Position] {
        &self.pawns
    }

    pub fn pawn_count(&self) -> usize {
        self.pawn_count
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn undos(&self) -> u32 {
        self.undos
    }

    pub fn puzzle_name(&self) -> &str {
        &self.puzzle_name
    }

    pub fn is_board_saved(&self) -> bool {
        self.is_board_saved
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--*-- Puzzle File Name --*--")?;
        writeln!(f, "puzzle filename: {}", self.puzzle_name)?;
        writeln!(f, "--*-- Level --*--")?;
        writeln!(f, "current/max: {}/{MAX_LEVEL}", self.level)?;
        writeln!(f, "--*-- Bishop Position --*--")?;
        if let Some(bishop) = self.bishop {
            writeln!(f, "{bishop}")?;
        }
        writeln!(f, "--*-- Pawn Position --*--")?;
        for (i, pawn) in self.pawns.iter().enumerate() {
            writeln!(f, "{i}: {pawn}")?;
        }
        writeln!(f, "--*-- Board Position --*--")?;
        write!(f, "{}", self.board)?;
        writeln!(f, "--*-- Pawns Left --*--")?;
        writeln!(f, "{}", self.pawn_count)?;
        writeln!(f, "--*-- Path --*--")?;
        for (i, pos) in self.history.iter().enumerate() {
            writeln!(f, "{i}: {pos}")?;
        }
        writeln!(f, "--*-- Stats --*--")?;
        write!(f, "C/M/U: {}/{}/{}", self.clicks, self.moves, self.undos)
    }
}

#[cfg(test)]
mod game_state_tests {
    use crate::dataset::scratch_dataset;

    use super::*;

    #[test]
    pub fn score_weighs_moves_clicks_and_undos() {
        let mut state = GameState::new(Mode::Capture);
        for _ in 0..5 {
            state.add_clicks();
        }
        for _ in 0..3 {
            state.add_moves();
        }
        state.undos = 2;

        assert_eq!(3 * 4 + 5 - 2 * 2, state.score());
    }

    #[test]
    pub fn score_can_go_negative() {
        let mut state = GameState::new(Mode::Release);
        state.undos = 3;

        assert_eq!(-6, state.score());
    }

    #[test]
    pub fn status_line_format() {
        let mut state = GameState::new(Mode::Capture);
        state.puzzle_name = String::from("04-0001");
        state.add_clicks();
        state.add_clicks();
        state.add_moves();

        assert_eq!(
            "Puzzle: 04-0001        Score: 6        # of Clicks / Moves / Undos : 2 / 1 / 0",
            state.status_line()
        );
    }

    #[test]
    pub fn new_state_has_unknown_puzzle_and_no_bishop() {
        let state = GameState::new(Mode::Capture);

        assert_eq!(DEFAULT_PUZZLE_NAME, state.puzzle_name());
        assert_eq!(None, state.bishop());
        assert_eq!(0, state.level());
        assert!(!state.is_game_over());
    }

    #[test]
    pub fn level_stops_at_max() {
        let mut state = GameState::new(Mode::Capture);
        for expected in 1..=MAX_LEVEL {
            assert!(state.advance_level());
            assert_eq!(expected, state.level());
        }

        assert!(!state.advance_level());
        assert_eq!(MAX_LEVEL, state.level());

        state.set_level(200);
        assert_eq!(MAX_LEVEL, state.level());
    }

    #[test]
    pub fn initialize_release_starts_empty() {
        let mut catalog = PuzzleCatalog::with_seed(scratch_dataset("initialize_release_starts_empty"), 0);
        let mut state = GameState::new(Mode::Release);
        state.initialize_game(&mut catalog);

        assert_eq!(None, state.bishop());
        assert!(state.pawns().is_empty());
        assert_eq!(0, state.pawn_count());
        assert!(state.history().is_empty());
        assert_eq!(None, state.board().find_bishop());
    }

    #[test]
    pub fn display_dumps_every_section() {
        let state = GameState::new(Mode::Release);
        let text = state.to_string();

        assert!(text.contains("puzzle filename: Unknown"));
        assert!(text.contains("current/max: 0/8"));
        assert!(text.contains(". . . . . . . ."));
        assert!(text.ends_with("C/M/U: 0/0/0"));
    }
}
