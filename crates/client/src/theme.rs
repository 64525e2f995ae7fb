//! Theme preference.
//!
//! The choice persists in the key-value store so it survives restarts; an
//! absent or unreadable slot falls back to light.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{KeyValueStore, THEME_KEY};

/// Visual theme of the shop UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Reads and persists the theme preference.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    store: KeyValueStore,
}

impl ThemeManager {
    #[must_use]
    pub const fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Current preference, defaulting to light.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be read.
    pub fn current(&self) -> Result<Theme> {
        Ok(self.store.get(THEME_KEY)?.unwrap_or_default())
    }

    /// Persist an explicit preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be written.
    pub fn set(&self, theme: Theme) -> Result<()> {
        tracing::debug!(theme = theme.as_str(), "persisting theme preference");
        self.store.put(THEME_KEY, &theme)?;
        Ok(())
    }

    /// Flip the preference and return the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be read or written.
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.current()?.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_manager() -> (tempfile::TempDir, ThemeManager) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::new(dir.path().join("storage.json"));
        (dir, ThemeManager::new(store))
    }

    #[test]
    fn test_default_is_light() {
        let (_dir, manager) = temp_manager();
        assert_eq!(manager.current().expect("current"), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let (_dir, manager) = temp_manager();
        assert_eq!(manager.toggle().expect("toggle"), Theme::Dark);
        assert_eq!(manager.current().expect("current"), Theme::Dark);
        assert_eq!(manager.toggle().expect("toggle"), Theme::Light);
    }
}
