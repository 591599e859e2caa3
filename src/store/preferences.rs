//! UI-mode preference

use crate::errors::Result;
use crate::schemas::UiMode;

use super::storage::KeyValueStore;

/// Storage key holding the preferred mode
pub const UI_MODE_KEY: &str = "uiMode";

/// Preferences backed by a key-value store
pub struct Preferences<S: KeyValueStore> {
    storage: S,
    default_mode: UiMode,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(storage: S, default_mode: UiMode) -> Self {
        Preferences {
            storage,
            default_mode,
        }
    }

    /// Stored mode, or the default when none or an unknown value is stored
    pub fn ui_mode(&self) -> Result<UiMode> {
        let stored = self.storage.get(UI_MODE_KEY)?;
        Ok(match stored.as_deref().map(str::trim) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(value, "ignoring unknown stored ui mode");
                self.default_mode
            }),
            None => self.default_mode,
        })
    }

    pub fn set_ui_mode(&mut self, mode: UiMode) -> Result<()> {
        self.storage.set(UI_MODE_KEY, &mode.to_string())?;
        tracing::debug!(%mode, "ui mode saved");
        Ok(())
    }

    /// Flip between chat and form and return the new mode
    pub fn toggle(&mut self) -> Result<UiMode> {
        let next = match self.ui_mode()? {
            UiMode::Chat => UiMode::Form,
            UiMode::Form => UiMode::Chat,
        };
        self.set_ui_mode(next)?;
        Ok(next)
    }
}
