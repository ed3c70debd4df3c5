use log::{error, info, warn};

use crate::{
    board::Cell,
    catalog::PuzzleCatalog,
    game_state::GameState,
    position::Position,
    puzzle_file::Puzzle,
};

// Play rules. The bishop may jump over pawns: solvability was fixed when the
// puzzle was built.
impl GameState {
    pub(crate) fn load_from_catalog(&mut self, catalog: &mut PuzzleCatalog) {
        let id = match catalog.select(self.level()) {
            Ok(id) => id,
            Err(e) => {
                warn!("Not loading a puzzle: {e}");
                self.puzzle_name.clear();
                return;
            }
        };

        self.puzzle_name = id.to_string();
        match catalog.load(id) {
            Ok(puzzle) => {
                info!("Loaded puzzle {id} with {} pawns", puzzle.pawns.len());
                self.load_puzzle(&puzzle);
            }
            Err(e) => error!("Failed to load puzzle {id}: {e}"),
        }
    }

    /// Places a puzzle on the board. Pawns that collide with the bishop or an
    /// earlier pawn are dropped.
    pub fn load_puzzle(&mut self, puzzle: &Puzzle) {
        self.board.clear();
        self.history.clear();
        self.pawns.clear();

        self.bishop = Some(puzzle.bishop);
        self.board.set(puzzle.bishop, Cell::Bishop);
        for &pawn in &puzzle.pawns {
            if self.board.get(pawn) != Cell::Empty {
                warn!("Dropping pawn at ({}, {}): square is already occupied", pawn.x, pawn.y);
                continue;
            }
            self.board.set(pawn, Cell::Pawn);
            self.pawns.push(pawn);
        }
        self.pawn_count = self.pawns.len();
    }

    pub(crate) fn capture_is_valid_move(&self, pos: Position) -> bool {
        let Some(bishop) = self.bishop else {
            return false;
        };

        self.board.get(pos).is_occupied() && pos != bishop && pos.is_diagonal(&bishop)
    }

    pub(crate) fn capture_move(&mut self, pos: Position) {
        let Some(bishop) = self.bishop else {
            return;
        };

        self.pawn_count = self.pawn_count.saturating_sub(1);
        self.history.push(bishop);
        self.board.set(bishop, Cell::Empty);
        self.board.set(pos, Cell::Bishop);
        self.bishop = Some(pos);
    }

    pub(crate) fn capture_undo(&mut self) {
        let Some(previous) = self.history.pop() else {
            // Nothing to take back, the starting square is only cleared
            if let Some(bishop) = self.bishop {
                self.board.set(bishop, Cell::Empty);
            }
            return;
        };

        self.undos += 1;
        if let Some(bishop) = self.bishop {
            self.board.set(bishop, Cell::Pawn);
        }
        self.bishop = Some(previous);
        self.board.set(previous, Cell::Bishop);
        self.pawn_count += 1;
    }
}
