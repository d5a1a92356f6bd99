//! Storage layer for taskmaster
//!
//! All state lives in a single data directory:
//!
//! ```text
//! <data dir>/
//!   tasks.json        # Task snapshot (all persisted tasks)
//!   places.json       # Local place gazetteer
//!   tm.toml           # Configuration
//!   *.lock            # Lock files guarding each snapshot
//! ```
//!
//! The directory defaults to the platform data dir (via `directories`) and
//! can be overridden with `--data-dir` or `TM_DATA_DIR`.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Storage manager for the taskmaster data directory
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at an explicit directory
    pub fn at(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the data directory: explicit override first, then the
    /// platform default.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::at(dir));
        }
        let dirs = ProjectDirs::from("", "", "taskmaster").ok_or_else(|| {
            Error::OperationFailed("could not determine a data directory".to_string())
        })?;
        Ok(Self::at(dirs.data_dir().to_path_buf()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    pub fn places_file(&self) -> PathBuf {
        self.data_dir.join("places.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("tm.toml")
    }

    /// Create the data directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Read JSON data from a file
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Write JSON data atomically (write to temp, then rename)
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        crate::lock::write_atomic(path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn storage_paths() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let storage = Storage::at(root.clone());

        assert_eq!(storage.tasks_file(), root.join("tasks.json"));
        assert_eq!(storage.places_file(), root.join("places.json"));
        assert_eq!(storage.config_file(), root.join("tm.toml"));
    }

    #[test]
    fn resolve_prefers_override() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::resolve(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(storage.data_dir(), temp.path());
    }

    #[test]
    fn json_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::at(temp.path().to_path_buf());
        storage.init().unwrap();

        #[derive(Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Snapshot {
            name: String,
            value: i32,
        }

        let path = storage.data_dir().join("snapshot.json");
        let data = Snapshot {
            name: "test".to_string(),
            value: 42,
        };

        storage.write_json(&path, &data).unwrap();
        let read_back: Snapshot = storage.read_json(&path).unwrap();
        assert_eq!(data, read_back);
    }
}
