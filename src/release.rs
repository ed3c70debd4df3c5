use log::{error, info};

use crate::{
    board::Cell,
    catalog::PuzzleCatalog,
    game_state::{GameState, Mode},
    position::Position,
    puzzle_file::{Puzzle, PuzzleId},
};

/// Constructions with this many pawns or fewer are not worth playing.
pub const MIN_PAWNS_TO_SKIP: usize = 3;

// Construction rules. Each move leaves a pawn on the square the bishop left.
impl GameState {
    pub(crate) fn release_is_valid_move(&self, pos: Position) -> bool {
        let Some(bishop) = self.bishop else {
            // First click places the bishop anywhere
            return true;
        };

        self.board.get(pos) == Cell::Empty && pos.is_diagonal(&bishop)
    }

    pub(crate) fn release_move(&mut self, pos: Position) {
        if let Some(bishop) = self.bishop {
            self.pawn_count += 1;
            self.board.set(bishop, Cell::Pawn);
            self.pawns.push(bishop);
            self.history.push(bishop);
        }

        self.bishop = Some(pos);
        self.board.set(pos, Cell::Bishop);
        self.is_board_saved = false;
    }

    pub(crate) fn release_undo(&mut self) {
        let Some(previous) = self.history.pop() else {
            if let Some(bishop) = self.bishop.take() {
                self.board.set(bishop, Cell::Empty);
            }
            return;
        };

        self.undos += 1;
        self.pawns.pop();
        if let Some(bishop) = self.bishop {
            self.board.set(bishop, Cell::Empty);
        }
        self.bishop = Some(previous);
        self.board.set(previous, Cell::Bishop);
        self.pawn_count = self.pawn_count.saturating_sub(1);
        self.is_board_saved = false;
    }

    /// The construction as a playable puzzle. Pawns are listed newest first so
    /// that capturing them in file order retraces the construction.
    pub fn to_puzzle(&self) -> Option<Puzzle> {
        let bishop = self.bishop?;
        Some(Puzzle {
            bishop,
            pawns: self.pawns.iter().rev().copied().collect(),
        })
    }

    /// Writes one puzzle per pawn count, from the full construction down to
    /// `MIN_PAWNS_TO_SKIP + 1` pawns, by taking back one construction move at
    /// a time on a copy. The live board is not touched apart from the saved
    /// flag. Files already written stay on disk if a later write fails.
    pub(crate) fn release_save(&mut self, catalog: &mut PuzzleCatalog) -> Vec<PuzzleId> {
        if self.pawn_count == 0 {
            info!("Nothing to save");
            return Vec::new();
        }
        if self.is_board_saved {
            info!("Board already saved");
            return Vec::new();
        }

        let mut harvest = self.harvest_copy();
        let mut written = Vec::new();
        let completed = loop {
            if harvest.pawn_count == 0 || harvest.is_board_saved {
                break true;
            }
            if harvest.pawn_count <= MIN_PAWNS_TO_SKIP {
                info!("Board with {} pawns is too simple to save", harvest.pawn_count);
                break true;
            }
            let Some(puzzle) = harvest.to_puzzle() else {
                break true;
            };

            match catalog.store(&puzzle) {
                Ok(id) => written.push(id),
                Err(e) => {
                    error!("Stopping puzzle save after {} files: {e}", written.len());
                    break false;
                }
            }

            harvest.is_board_saved = true;
            harvest.release_undo();
        };

        if completed {
            self.is_board_saved = true;
        }
        info!("Saved {} puzzles", written.len());
        written
    }

    fn harvest_copy(&self) -> GameState {
        let mut copy = GameState::new(Mode::Release);
        copy.bishop = self.bishop;
        copy.pawns = self.pawns.clone();
        copy.history = self.history.clone();
        copy.pawn_count = self.pawn_count;
        copy.board = self.board.clone();
        copy
    }
}
