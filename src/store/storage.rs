//! Key-value storage backends

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{IntakeError, Result};
use crate::fs;

/// String blobs addressed by key
pub trait KeyValueStore {
    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used by tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a storage directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Store rooted at the `storage/` directory of a data directory
    pub fn in_data_dir(data_dir: &Path) -> Self {
        FileStore::new(fs::get_storage_dir(data_dir))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = fs::get_storage_path(&self.dir, key)?;
        match fs::read_text(&path) {
            Ok(content) => Ok(Some(content)),
            Err(IntakeError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(IntakeError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = fs::get_storage_path(&self.dir, key)?;
        fs::write_text(&path, value)
            .map_err(|e| IntakeError::Storage(format!("Failed to write {}: {}", key, e)))
    }
}
