//! JSON and text file operations
//!
//! Reads map missing files and bad JSON onto the crate's error variants;
//! writes go through a temp file and a rename so readers never see half a file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{IntakeError, Result};

/// Read a whole file as text.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IntakeError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            IntakeError::Io(e)
        }
    })
}

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the expected schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_text(path)?;

    serde_json::from_str(&content).map_err(|e| {
        IntakeError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write text to a file atomically, creating parent directories.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write a value to a JSON file with pretty formatting.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(data).map_err(|e| IntakeError::InvalidJson(e.to_string()))?;
    content.push('\n');
    write_text(path, &content)
}
