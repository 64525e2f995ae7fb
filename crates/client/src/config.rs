//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FLORET_BASE_URL` - Base URL of the shop API (e.g., `https://shop.example`)
//! - `FLORET_CSRF_TOKEN` - Anti-forgery token sent on every mutating request
//!
//! ## Optional
//! - `FLORET_CART_BACKEND` - `local` (default) or `remote`
//! - `FLORET_STORAGE_PATH` - Key-value store file (default: `.floret/storage.json`)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    /// The anti-forgery token is missing or empty. Mutating requests are
    /// rejected server-side without it, so this is a hard error rather than
    /// a best-effort omission.
    #[error("anti-forgery token is missing or empty ({0})")]
    MissingCsrfToken(String),
}

/// Which cart backend a page runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartBackendKind {
    /// Entries live in the local key-value store.
    #[default]
    Local,
    /// Entries live server-side; the session identifies the cart.
    Remote,
}

impl std::str::FromStr for CartBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            _ => Err(format!("invalid cart backend: {s} (expected local|remote)")),
        }
    }
}

/// Client application configuration.
///
/// Implements `Debug` manually to redact the anti-forgery token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the shop API.
    pub base_url: Url,
    /// Anti-forgery token sent as a header on every mutating request.
    pub csrf_token: SecretString,
    /// Which cart backend to construct.
    pub cart_backend: CartBackendKind,
    /// Path of the durable key-value store file.
    pub storage_path: PathBuf,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("csrf_token", &"[REDACTED]")
            .field("cart_backend", &self.cart_backend)
            .field("storage_path", &self.storage_path)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the anti-forgery token is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("FLORET_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("FLORET_BASE_URL".to_string(), e.to_string()))?;

        let csrf_token = get_csrf_token("FLORET_CSRF_TOKEN")?;

        let cart_backend = get_env_or_default("FLORET_CART_BACKEND", "local")
            .parse::<CartBackendKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("FLORET_CART_BACKEND".to_string(), e))?;

        let storage_path =
            PathBuf::from(get_env_or_default("FLORET_STORAGE_PATH", ".floret/storage.json"));

        Ok(Self {
            base_url,
            csrf_token,
            cart_backend,
            storage_path,
        })
    }

    /// Build a configuration directly (tests, embedding).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCsrfToken` if `csrf_token` is empty.
    pub fn new(
        base_url: Url,
        csrf_token: SecretString,
        cart_backend: CartBackendKind,
        storage_path: PathBuf,
    ) -> Result<Self, ConfigError> {
        if csrf_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingCsrfToken("csrf_token".to_string()));
        }
        Ok(Self {
            base_url,
            csrf_token,
            cart_backend,
            storage_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load the anti-forgery token, rejecting absent or blank values.
fn get_csrf_token(key: &str) -> Result<SecretString, ConfigError> {
    let value =
        std::env::var(key).map_err(|_| ConfigError::MissingCsrfToken(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::MissingCsrfToken(key.to_string()));
    }
    Ok(SecretString::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_url() -> Url {
        "https://shop.example".parse().expect("valid url")
    }

    #[test]
    fn test_empty_csrf_token_is_a_config_error() {
        let result = ClientConfig::new(
            test_url(),
            SecretString::from("   "),
            CartBackendKind::Local,
            PathBuf::from("storage.json"),
        );
        assert!(matches!(result, Err(ConfigError::MissingCsrfToken(_))));
    }

    #[test]
    fn test_debug_redacts_csrf_token() {
        let config = ClientConfig::new(
            test_url(),
            SecretString::from("tok-3f9c81"),
            CartBackendKind::Remote,
            PathBuf::from("storage.json"),
        )
        .expect("valid config");

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok-3f9c81"));
    }

    #[test]
    fn test_cart_backend_parse() {
        assert_eq!("local".parse::<CartBackendKind>().ok(), Some(CartBackendKind::Local));
        assert_eq!("remote".parse::<CartBackendKind>().ok(), Some(CartBackendKind::Remote));
        assert!("hybrid".parse::<CartBackendKind>().is_err());
    }
}
