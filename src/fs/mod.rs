//! File system utilities for intake
//!
//! Provides data-directory path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_json, read_text, write_json, write_text};
pub use paths::{
    get_config_path, get_storage_dir, get_storage_path, resolve_data_dir, resolve_flows_dir,
    DATA_DIR_ENV, DEFAULT_DATA_DIR,
};
