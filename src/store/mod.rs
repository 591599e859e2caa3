//! Persistence behind a get/set key-value boundary
//!
//! Task records and the UI-mode preference each live under one key.

mod preferences;
mod storage;
mod tasks;

pub use preferences::{Preferences, UI_MODE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tasks::{TaskStore, DEFAULT_TASK_TITLE, TASKS_KEY};
