//! Theme commands.

use floret_client::storage::KeyValueStore;
use floret_client::theme::{Theme, ThemeManager};
use thiserror::Error;

use super::setup;

/// Errors from theme commands.
#[derive(Debug, Error)]
pub enum ThemeCommandError {
    #[error(transparent)]
    Config(#[from] floret_client::config::ConfigError),

    #[error("invalid theme: {0} (expected light|dark)")]
    InvalidTheme(String),

    #[error(transparent)]
    Client(#[from] floret_client::ClientError),
}

fn manager() -> Result<ThemeManager, ThemeCommandError> {
    let (config, _notifier) = setup()?;
    Ok(ThemeManager::new(KeyValueStore::new(&config.storage_path)))
}

pub fn show() -> Result<(), ThemeCommandError> {
    let theme = manager()?.current()?;
    tracing::info!("Theme: {}", theme.as_str());
    Ok(())
}

pub fn set(raw: &str) -> Result<(), ThemeCommandError> {
    let theme = match raw {
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        _ => return Err(ThemeCommandError::InvalidTheme(raw.to_string())),
    };
    manager()?.set(theme)?;
    tracing::info!("Theme set to {}", theme.as_str());
    Ok(())
}

pub fn toggle() -> Result<(), ThemeCommandError> {
    let theme = manager()?.toggle()?;
    tracing::info!("Theme is now {}", theme.as_str());
    Ok(())
}
