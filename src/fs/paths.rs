//! Path resolution utilities for intake
//!
//! Everything the CLI persists lives under one data directory.

use std::path::{Path, PathBuf};

use crate::errors::{IntakeError, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "INTAKE_DATA_DIR";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = ".intake";

/// Resolve the data directory: explicit flag, then environment, then default.
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Get the path to the config.json file.
pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Get the directory holding key-value storage files.
pub fn get_storage_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("storage")
}

/// Get the file backing one storage key.
///
/// # Errors
/// * `Storage` - If the key is empty or could escape the storage directory
pub fn get_storage_path(storage_dir: &Path, key: &str) -> Result<PathBuf> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(IntakeError::Storage(format!("Invalid storage key: {:?}", key)));
    }
    Ok(storage_dir.join(format!("{}.json", key)))
}

/// Resolve a configured flows directory against the data directory.
pub fn resolve_flows_dir(data_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
