//! Per-invocation state shared by the commands

use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::errors::Result;
use crate::flows::FlowRegistry;
use crate::fs;
use crate::schemas::Config;
use crate::store::{FileStore, Preferences, TaskStore};

/// Resolved data directory and configuration
#[derive(Debug, Clone)]
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
    pub dry_run: bool,
}

impl Context {
    /// Resolve the data directory and load its configuration
    pub fn load(data_dir: Option<&Path>, dry_run: bool) -> Result<Self> {
        let data_dir = fs::resolve_data_dir(data_dir);
        let config = load_config(&data_dir)?;
        tracing::debug!(data_dir = %data_dir.display(), "context loaded");
        Ok(Context {
            data_dir,
            config,
            dry_run,
        })
    }

    /// Bundled flows plus any from the configured flows directory
    pub fn registry(&self) -> Result<FlowRegistry> {
        let mut registry = FlowRegistry::bundled()?;
        if let Some(dir) = &self.config.flows_dir {
            let dir = fs::resolve_flows_dir(&self.data_dir, dir);
            let loaded = registry.load_dir(&dir)?;
            tracing::debug!(dir = %dir.display(), loaded, "extra flows loaded");
        }
        Ok(registry)
    }

    pub fn storage(&self) -> FileStore {
        FileStore::in_data_dir(&self.data_dir)
    }

    pub fn task_store(&self) -> Result<TaskStore<FileStore>> {
        TaskStore::open(self.storage(), self.config.task_total_steps)
    }

    pub fn preferences(&self) -> Preferences<FileStore> {
        Preferences::new(self.storage(), self.config.default_ui_mode)
    }
}
