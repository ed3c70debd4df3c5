use std::{fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{board::BOARD_SIZE, errors::PuzzleError};

static COORDINATE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(-?\d+)\s+(-?\d+)\s*$").unwrap());

/// A square on the board. `x` is the column, `y` is the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE);
        Position { x, y }
    }

    pub fn try_new(x: i64, y: i64) -> Option<Self> {
        let range = 0..BOARD_SIZE as i64;
        if range.contains(&x) && range.contains(&y) {
            Some(Position { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    /// True when `other` is reachable along a diagonal. A square is never
    /// diagonal to itself.
    pub fn is_diagonal(&self, other: &Position) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx == dy && dx != 0
    }
}

/// Splits an `a b` line into its two integers. Shared by puzzle and index lines.
pub fn parse_int_pair(line: &str) -> Result<(i64, i64), PuzzleError> {
    let Some(captures) = COORDINATE_LINE.captures(line) else {
        return Err(PuzzleError::parse(line, "expected two space separated integers"));
    };

    let first = captures[1]
        .parse::<i64>()
        .map_err(|e| PuzzleError::parse(line, e.to_string()))?;
    let second = captures[2]
        .parse::<i64>()
        .map_err(|e| PuzzleError::parse(line, e.to_string()))?;

    Ok((first, second))
}

impl FromStr for Position {
    type Err = PuzzleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_int_pair(line)?;
        Position::try_new(x, y).ok_or_else(|| PuzzleError::parse(line, "coordinate outside the board"))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}
