use std::fmt::{Debug, Display};

use crate::position::Position;

pub const BOARD_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Pawn,
    Bishop,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Pawn => 'P',
            Cell::Bishop => 'Q',
        }
    }

    pub fn is_occupied(self) -> bool {
        self != Cell::Empty
    }
}

/// Occupancy grid indexed `[y][x]`.
///
/// Only `GameState` writes to the board; it keeps the grid consistent with the
/// bishop square and the pawn list.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.y as usize][pos.x as usize]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.y as usize][pos.x as usize] = cell;
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    }
}

#[cfg(test)]
impl Board {
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|c| **c == cell).count()
    }

    pub fn find_bishop(&self) -> Option<Position> {
        self.squares().find(|(_, cell)| *cell == Cell::Bishop).map(|(pos, _)| pos)
    }

    /// Every square in row-major order with its contents.
    pub fn squares(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        (0..BOARD_SIZE).flat_map(move |y| {
            (0..BOARD_SIZE).map(move |x| {
                let pos = Position::new(x as u8, y as u8);
                (pos, self.get(pos))
            })
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        write!(f, "{self}")
    }
}
