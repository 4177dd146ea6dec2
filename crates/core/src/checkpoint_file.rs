//! File-backed search checkpoints.
//!
//! The file is a single JSON document:
//! - `format_version` and `grid_size` identify the layout and board the
//!   checkpoint was produced for.
//! - `checkpoint` holds the solver stacks and the best path so far.
//! - `sha256_hex` is `hex(SHA-256(compact JSON of checkpoint))`, so edited or
//!   truncated files are rejected before the solver ever sees them.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::solver::SearchCheckpoint;
use crate::types::GRID_SIZE;

pub const CHECKPOINT_FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize, Debug, Clone)]
struct CheckpointDocument {
    format_version: u16,
    grid_size: i32,
    sha256_hex: String,
    checkpoint: SearchCheckpoint,
}

/// Describes why a checkpoint file could not be loaded.
#[derive(Debug, Error)]
pub enum CheckpointLoadError {
    #[error("checkpoint I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("checkpoint is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unsupported checkpoint format version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("checkpoint was written for a {found}x{found} grid")]
    GridSizeMismatch { found: i32 },
    #[error("checkpoint checksum does not match its contents")]
    ChecksumMismatch,
}

fn checkpoint_sha256(checkpoint: &SearchCheckpoint) -> Result<String, serde_json::Error> {
    let body_json = serde_json::to_string(checkpoint)?;
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    let result = hasher.finalize();
    Ok(format!("{result:064x}"))
}

/// Atomically writes `checkpoint` to `path`, creating parent directories.
pub fn write_checkpoint(path: &Path, checkpoint: &SearchCheckpoint) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let document = CheckpointDocument {
        format_version: CHECKPOINT_FORMAT_VERSION,
        grid_size: GRID_SIZE,
        sha256_hex: checkpoint_sha256(checkpoint).map_err(io::Error::other)?,
        checkpoint: checkpoint.clone(),
    };
    let json = serde_json::to_string_pretty(&document).map_err(io::Error::other)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Loads a checkpoint and verifies its header and checksum. Structural
/// consistency of the stacks is checked later by `Solver::resume`.
pub fn load_checkpoint(path: &Path) -> Result<SearchCheckpoint, CheckpointLoadError> {
    let content = fs::read_to_string(path)?;
    let document: CheckpointDocument = serde_json::from_str(&content)?;

    if document.format_version != CHECKPOINT_FORMAT_VERSION {
        return Err(CheckpointLoadError::UnsupportedVersion { found: document.format_version });
    }
    if document.grid_size != GRID_SIZE {
        return Err(CheckpointLoadError::GridSizeMismatch { found: document.grid_size });
    }

    let expected = checkpoint_sha256(&document.checkpoint)?;
    if expected != document.sha256_hex {
        return Err(CheckpointLoadError::ChecksumMismatch);
    }

    Ok(document.checkpoint)
}
