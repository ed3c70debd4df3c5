use std::path::PathBuf;

use crate::puzzle_file::PuzzleId;

pub const DEFAULT_DATASET_DIR: &str = "./dataset";

const PUZZLE_DIR: &str = "puzzle";
const INDEX_FILE: &str = "index.txt";
const SCORE_FILE: &str = "score/scorefile.csv";

/// On-disk layout of the puzzle collection, rooted at one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Dataset { root: root.into() }
    }

    pub fn puzzle_dir(&self) -> PathBuf {
        self.root.join(PUZZLE_DIR)
    }

    pub fn puzzle_path(&self, id: PuzzleId) -> PathBuf {
        self.puzzle_dir().join(format!("{id}.txt"))
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn score_path(&self) -> PathBuf {
        self.root.join(SCORE_FILE)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::new(DEFAULT_DATASET_DIR)
    }
}

/// A fresh, empty dataset directory for a single test.
#[cfg(test)]
pub fn scratch_dataset(test_name: &str) -> Dataset {
    let root = std::env::temp_dir().join(format!("bishop-puzzle-{}-{test_name}", std::process::id()));
    if root.exists() {
        std::fs::remove_dir_all(&root).unwrap();
    }
    std::fs::create_dir_all(root.join(PUZZLE_DIR)).unwrap();
    Dataset::new(root)
}

#[cfg(test)]
mod dataset_tests {
    use super::*;

    #[test]
    pub fn paths_follow_the_dataset_layout() {
        let dataset = Dataset::new("/data");

        assert_eq!(PathBuf::from("/data/index.txt"), dataset.index_path());
        assert_eq!(PathBuf::from("/data/score/scorefile.csv"), dataset.score_path());
        assert_eq!(
            PathBuf::from("/data/puzzle/04-0012.txt"),
            dataset.puzzle_path(PuzzleId::new(4, 12))
        );
    }
}
