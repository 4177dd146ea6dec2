use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Direction, GRID_SIZE};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Ordered record of the moves of one game, replayable from the initial
/// state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveJournal {
    pub format_version: u16,
    pub grid_size: i32,
    pub moves: Vec<Direction>,
}

impl MoveJournal {
    pub fn new() -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, grid_size: GRID_SIZE, moves: Vec::new() }
    }

    pub fn from_moves(moves: Vec<Direction>) -> Self {
        Self { moves, ..Self::new() }
    }

    pub fn append(&mut self, action: Direction) {
        self.moves.push(action);
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let journal: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(journal)
    }
}

impl Default for MoveJournal {
    fn default() -> Self {
        Self::new()
    }
}
