use std::ops::RangeInclusive;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    dataset::Dataset,
    errors::PuzzleError,
    puzzle_file::{IndexMap, Puzzle, PuzzleId, read_index, read_puzzle, write_index, write_puzzle},
};

#[rustfmt::skip]
static LEVEL_PAWN_COUNTS: [(u8, u8); 10] = [
    (4, 4),
    (5, 6),
    (7, 8),
    (9, 10),
    (11, 12),
    (13, 14),
    (15, 16),
    (17, 18),
    (18, 19),
    (19, 20),
];

pub fn pawn_count_range(level: u8) -> Option<RangeInclusive<u8>> {
    LEVEL_PAWN_COUNTS
        .get(level as usize)
        .map(|(low, high)| *low..=*high)
}

/// Owns the index of stored puzzles and hands out both random picks for play
/// and fresh file numbers for new puzzles.
///
/// The index file is read the first time it is needed and kept in memory
/// afterwards. Every assignment rewrites it. Taking `&mut self` for both
/// selection and storage keeps a harvest from interleaving with anything else.
pub struct PuzzleCatalog {
    dataset: Dataset,
    index: Option<IndexMap>,
    rng: StdRng,
}

impl PuzzleCatalog {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_rng(dataset, StdRng::from_entropy())
    }

    pub fn with_seed(dataset: Dataset, seed: u64) -> Self {
        Self::with_rng(dataset, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dataset: Dataset, rng: StdRng) -> Self {
        PuzzleCatalog {
            dataset,
            index: None,
            rng,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn index_mut(&mut self) -> &mut IndexMap {
        self.index.get_or_insert_with(|| load_index(&self.dataset))
    }

    /// Picks a random stored puzzle whose pawn count fits `level`.
    pub fn select(&mut self, level: u8) -> Result<PuzzleId, PuzzleError> {
        let Some(range) = pawn_count_range(level) else {
            return Err(PuzzleError::LevelOutOfRange(level));
        };

        let pawn_count = self.rng.gen_range(range);
        let highest = self.index_mut().get(&pawn_count).copied().unwrap_or(0);
        if highest == 0 {
            return Err(PuzzleError::PuzzleUnavailable { level, pawn_count });
        }

        let id = PuzzleId::new(pawn_count, self.rng.gen_range(1..=highest));
        debug!("Selected puzzle {id} for level {level}");
        Ok(id)
    }

    pub fn load(&self, id: PuzzleId) -> Result<Puzzle, PuzzleError> {
        let puzzle = read_puzzle(&self.dataset.puzzle_path(id))?;
        if puzzle.pawns.len() != id.pawn_count as usize {
            warn!(
                "Puzzle {id} names {} pawns but contains {}",
                id.pawn_count,
                puzzle.pawns.len()
            );
        }
        Ok(puzzle)
    }

    /// The file number the next puzzle with `pawn_count` pawns will get.
    pub fn next_file_number(&mut self, pawn_count: u8) -> Result<u32, PuzzleError> {
        match self.index_mut().get(&pawn_count) {
            None => Ok(1),
            Some(highest) => highest
                .checked_add(1)
                .ok_or(PuzzleError::FileNumbersExhausted(pawn_count)),
        }
    }

    /// Writes `puzzle` under the next free number for its pawn count, then
    /// records that number in the index file.
    pub fn store(&mut self, puzzle: &Puzzle) -> Result<PuzzleId, PuzzleError> {
        // At most 63 pawns fit next to the bishop
        let pawn_count = puzzle.pawns.len() as u8;
        let id = PuzzleId::new(pawn_count, self.next_file_number(pawn_count)?);

        write_puzzle(&self.dataset.puzzle_path(id), puzzle)?;

        // The number only counts as assigned once the index file records it
        let mut index = self.index_mut().clone();
        index.insert(pawn_count, id.file_number);
        write_index(&self.dataset.index_path(), &index)?;
        self.index = Some(index);

        info!("Stored puzzle {id}");
        Ok(id)
    }
}

fn load_index(dataset: &Dataset) -> IndexMap {
    match read_index(&dataset.index_path()) {
        Ok(index) => index,
        Err(e) => {
            warn!("Starting with an empty puzzle index: {e}");
            IndexMap::new()
        }
    }
}
