use std::{fs, path::Path};

use log::{debug, warn};

use crate::errors::PuzzleError;

/// One leaderboard row from `scorefile.csv`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
    pub clicks: u32,
    pub moves: u32,
    pub undos: u32,
}

impl ScoreEntry {
    fn from_line(line: &str) -> Result<ScoreEntry, PuzzleError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(PuzzleError::parse(
                line,
                format!("expected 5 comma separated fields but found {}", fields.len()),
            ));
        }

        let number_error = |e: std::num::ParseIntError| PuzzleError::parse(line, e.to_string());
        Ok(ScoreEntry {
            name: fields[0].to_string(),
            score: fields[1].parse().map_err(number_error)?,
            clicks: fields[2].parse().map_err(number_error)?,
            moves: fields[3].parse().map_err(number_error)?,
            undos: fields[4].parse().map_err(number_error)?,
        })
    }
}

pub fn parse_scores(text: &str) -> Vec<ScoreEntry> {
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .filter_map(|line| match ScoreEntry::from_line(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping score line: {e}");
                None
            }
        })
        .collect()
}

pub fn read_scores(path: &Path) -> Result<Vec<ScoreEntry>, PuzzleError> {
    debug!("Reading score file {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| PuzzleError::io(path, e))?;
    Ok(parse_scores(&text))
}
