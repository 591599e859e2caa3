//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{IntakeError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the data directory, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Arguments
/// * `data_dir` - Path to the intake data directory
///
/// # Returns
/// The resolved configuration
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let path = fs::get_config_path(data_dir);
    match fs::read_json::<Config>(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        Err(IntakeError::FileNotFound(_)) => Ok(Config::default()),
        Err(IntakeError::InvalidJson(message)) => Err(IntakeError::ConfigError(message)),
        Err(e) => Err(e),
    }
}
