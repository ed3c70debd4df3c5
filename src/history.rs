use tinyvec::ArrayVec;

use crate::{board::BOARD_SIZE, position::Position};

// The bishop can never make more moves than there are other squares
const MAX_HISTORY: usize = BOARD_SIZE * BOARD_SIZE;

/// Squares the bishop has left, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    path: ArrayVec<[Position; MAX_HISTORY]>,
}

impl History {
    pub fn push(&mut self, pos: Position) {
        if self.path.len() >= MAX_HISTORY {
            panic!(
                "History push: path length is {} which is already at MAX_HISTORY {MAX_HISTORY}",
                self.path.len()
            );
        }

        self.path.push(pos);
    }

    pub fn pop(&mut self) -> Option<Position> {
        self.path.pop()
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.path.iter()
    }
}

#[cfg(test)]
impl History {
    pub fn last(&self) -> Option<Position> {
        self.path.last().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    pub fn pops_in_reverse_push_order() {
        let mut history = History::default();
        history.push(Position::new(0, 0));
        history.push(Position::new(2, 2));

        assert_eq!(2, history.len());
        assert_eq!(Some(Position::new(2, 2)), history.last());
        assert_eq!(Some(Position::new(2, 2)), history.pop());
        assert_eq!(Some(Position::new(0, 0)), history.pop());
        assert_eq!(None, history.pop());
        assert!(history.is_empty());
    }

    #[test]
    pub fn holds_a_full_board_of_moves() {
        let mut history = History::default();
        for i in 0..MAX_HISTORY {
            history.push(Position::new((i % 8) as u8, (i / 8) as u8));
        }

        assert_eq!(MAX_HISTORY, history.len());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    #[should_panic]
    pub fn overflow_panics() {
        let mut history = History::default();
        for _ in 0..=MAX_HISTORY {
            history.push(Position::new(0, 0));
        }
    }
}
