use std::path::PathBuf;

use crate::position::Position;

/// Failures surfaced by the puzzle model.
///
/// None of these are fatal. The controller logs them and treats the current
/// command as a no-op, so the process keeps running with whatever state it
/// had before the failing step.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    /// The bishop cannot move to this square under the current mode's rules.
    #[error("invalid move to ({}, {})", .0.x, .0.y)]
    InvalidMove(Position),

    /// The index has no puzzle files for the pawn count picked for this level.
    #[error("no puzzle available for level {level} (pawn count {pawn_count})")]
    PuzzleUnavailable { level: u8, pawn_count: u8 },

    /// The level is not in the difficulty table.
    #[error("level {0} is outside the difficulty table")]
    LevelOutOfRange(u8),

    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single line could not be read as `x y` or `pawnCount fileNumber`.
    #[error("could not parse line '{line}': {reason}")]
    Parse { line: String, reason: String },

    /// The index already holds the highest file number for this pawn count.
    #[error("no file numbers left for {0} pawn puzzles")]
    FileNumbersExhausted(u8),

    /// A puzzle file contained no position lines at all.
    #[error("puzzle file {} has no bishop position", .0.display())]
    MissingBishop(PathBuf),
}

impl PuzzleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PuzzleError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: &str, reason: impl Into<String>) -> Self {
        PuzzleError::Parse {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
