//! Persistent key bindings.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::APP_NAME;
use crate::input::{KeyMap, KeyMapError};

pub const KEYMAP_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyMapFile {
    pub format_version: u32,
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
}

#[derive(Debug, Error)]
pub enum KeyMapLoadError {
    #[error("failed to read key map {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("key map {path} has unsupported format version {found}")]
    UnsupportedVersion { path: PathBuf, found: u32 },
    #[error("invalid key map {path}: {source}")]
    Invalid { path: PathBuf, source: KeyMapError },
}

impl Default for KeyMapFile {
    fn default() -> Self {
        Self { format_version: KEYMAP_FORMAT_VERSION, up: 'l', down: 'n', left: 'r', right: 's' }
    }
}

impl KeyMapFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.config_dir().to_path_buf();
            path.push("keymap.json");
            path
        })
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(file)
    }

    pub fn key_map(&self) -> Result<KeyMap, KeyMapError> {
        KeyMap::new(self.up, self.down, self.left, self.right)
    }
}

/// Resolves the bindings to play with: an explicit file must load; otherwise
/// the per-user config file is used when present, else the defaults.
pub fn resolve_key_map(explicit: Option<&Path>) -> Result<KeyMap, KeyMapLoadError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match KeyMapFile::get_default_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(KeyMap::default()),
        },
    };

    debug!(path = %path.display(), "loading key map");
    let file = KeyMapFile::load(&path)
        .map_err(|source| KeyMapLoadError::Io { path: path.clone(), source })?;
    if file.format_version != KEYMAP_FORMAT_VERSION {
        return Err(KeyMapLoadError::UnsupportedVersion { path, found: file.format_version });
    }
    file.key_map().map_err(|source| KeyMapLoadError::Invalid { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(path: &Path, file: &KeyMapFile) {
        fs::write(path, serde_json::to_string_pretty(file).unwrap()).unwrap();
    }

    #[test]
    fn keymap_file_roundtrip() {
        let file = KeyMapFile { format_version: 1, up: 'w', down: 's', left: 'a', right: 'd' };
        let json = serde_json::to_string(&file).expect("serialize");
        let decoded: KeyMapFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(file, decoded);
    }

    #[test]
    fn default_file_matches_default_bindings() {
        let file = KeyMapFile::default();
        assert_eq!((file.up, file.down, file.left, file.right), ('l', 'n', 'r', 's'));
        assert_eq!(file.key_map(), Ok(KeyMap::default()));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("keymap.json");
        let file = KeyMapFile { format_version: 1, up: 'w', down: 's', left: 'a', right: 'd' };
        write_file(&path, &file);

        let keymap = resolve_key_map(Some(&path)).expect("resolve");
        assert_eq!(keymap, KeyMap::new('w', 's', 'a', 'd').unwrap());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        assert!(matches!(resolve_key_map(Some(&path)), Err(KeyMapLoadError::Io { .. })));
    }

    #[test]
    fn duplicate_keys_in_file_are_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("keymap.json");
        let file = KeyMapFile { format_version: 1, up: 'w', down: 'w', left: 'a', right: 'd' };
        write_file(&path, &file);

        assert!(matches!(
            resolve_key_map(Some(&path)),
            Err(KeyMapLoadError::Invalid { source: KeyMapError::DuplicateBinding { key: 'w' }, .. })
        ));
    }

    #[test]
    fn unknown_format_version_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("keymap.json");
        fs::write(&path, r#"{"format_version":2,"up":"w","down":"s","left":"a","right":"d"}"#)
            .expect("write");

        assert!(matches!(
            resolve_key_map(Some(&path)),
            Err(KeyMapLoadError::UnsupportedVersion { found: 2, .. })
        ));
    }
}
