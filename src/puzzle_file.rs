use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, warn};

use crate::{
    errors::PuzzleError,
    position::{Position, parse_int_pair},
};

pub const BISHOP_HEADER: &str = "#--*-- Bishop Position --*--";
pub const PAWN_HEADER: &str = "#--*-- Pawn Position --*--";
pub const INDEX_HEADER: &str = "# pawnNumber fileNumber";

/// Pawn count to the highest file number assigned for that count.
pub type IndexMap = BTreeMap<u8, u32>;

/// Names one puzzle file, `NN-FFFF`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleId {
    pub pawn_count: u8,
    pub file_number: u32,
}

impl PuzzleId {
    pub fn new(pawn_count: u8, file_number: u32) -> Self {
        PuzzleId {
            pawn_count,
            file_number,
        }
    }
}

impl Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.pawn_count, self.file_number)
    }
}

/// A bishop square and the pawns in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    pub bishop: Position,
    pub pawns: Vec<Position>,
}

impl Puzzle {
    /// Reads puzzle text. Comment lines are ignored and malformed lines are
    /// skipped with a warning. The first good line is the bishop. Returns
    /// `None` when no line could be read as a position.
    pub fn from_text(text: &str) -> Option<Puzzle> {
        let mut bishop = None;
        let mut pawns = Vec::new();
        let mut seen = HashSet::new();

        for line in text.lines() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let pos = match line.parse::<Position>() {
                Ok(pos) => pos,
                Err(e) => {
                    warn!("Skipping puzzle line: {e}");
                    continue;
                }
            };

            if !seen.insert(pos) {
                warn!("Skipping puzzle line '{line}': square is already occupied");
                continue;
            }

            if bishop.is_none() {
                bishop = Some(pos);
            } else {
                pawns.push(pos);
            }
        }

        bishop.map(|bishop| Puzzle { bishop, pawns })
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(BISHOP_HEADER);
        text.push('\n');
        text.push_str(&format!("{}\n", self.bishop));
        text.push_str(PAWN_HEADER);
        text.push('\n');
        for pawn in &self.pawns {
            text.push_str(&format!("{pawn}\n"));
        }
        text
    }
}

pub fn read_puzzle(path: &Path) -> Result<Puzzle, PuzzleError> {
    debug!("Reading puzzle file {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| PuzzleError::io(path, e))?;
    Puzzle::from_text(&text).ok_or_else(|| PuzzleError::MissingBishop(path.to_path_buf()))
}

pub fn write_puzzle(path: &Path, puzzle: &Puzzle) -> Result<(), PuzzleError> {
    debug!("Writing puzzle file {}", path.display());
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| PuzzleError::io(dir, e))?;
    }

    write_text(path, &puzzle.to_text())
}

pub fn parse_index(text: &str) -> IndexMap {
    let mut index = IndexMap::new();

    for line in text.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let (pawn_count, file_number) = match parse_int_pair(line) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Skipping index line: {e}");
                continue;
            }
        };

        match (u8::try_from(pawn_count), u32::try_from(file_number)) {
            (Ok(pawn_count), Ok(file_number)) => {
                index.insert(pawn_count, file_number);
            }
            _ => warn!("Skipping index line '{line}': value out of range"),
        }
    }

    index
}

pub fn format_index(index: &IndexMap) -> String {
    let mut text = String::from(INDEX_HEADER);
    text.push('\n');
    for (pawn_count, file_number) in index {
        text.push_str(&format!("{pawn_count} {file_number}\n"));
    }
    text
}

pub fn read_index(path: &Path) -> Result<IndexMap, PuzzleError> {
    debug!("Reading index file {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| PuzzleError::io(path, e))?;
    Ok(parse_index(&text))
}

pub fn write_index(path: &Path, index: &IndexMap) -> Result<(), PuzzleError> {
    debug!("Writing index file {}", path.display());
    write_text(path, &format_index(index))
}

fn write_text(path: &Path, text: &str) -> Result<(), PuzzleError> {
    let file = File::create(path).map_err(|e| PuzzleError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| PuzzleError::io(path, e))
}
