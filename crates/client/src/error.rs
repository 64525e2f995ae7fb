//! Unified error handling for client operations.
//!
//! The taxonomy mirrors how failures are surfaced to the user: network
//! failures and permission failures become toasts, an authorization failure
//! becomes a sign-in prompt, and local validation failures never leave the
//! client. No operation is retried; every failure is terminal for that user
//! action.

use thiserror::Error;

use crate::notify::NotificationKind;
use crate::storage::StorageError;

/// Client-side error for any shop API or storage operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (request never completed).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 401 - the user must sign in. Surfaced as a sign-in prompt,
    /// never as a toast.
    #[error("authorization required")]
    Unauthorized,

    /// HTTP 403 - the user is signed in but lacks permission.
    #[error("permission denied")]
    Forbidden,

    /// Any other non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose envelope carried `success: false`.
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Local key-value storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Local validation failed; no request was issued.
    #[error("validation: {0}")]
    Validation(String),

    /// A request URL could not be constructed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Map this error to the toast that should be shown for a failed
    /// `action` ("adding to cart", "deleting user", ...).
    ///
    /// Returns `None` for [`Self::Unauthorized`]: a 401 triggers the sign-in
    /// prompt instead of a toast.
    #[must_use]
    pub fn toast(&self, action: &str) -> Option<(NotificationKind, String)> {
        match self {
            Self::Unauthorized => None,
            Self::Forbidden => Some((
                NotificationKind::Error,
                "You don't have permission to do that".to_string(),
            )),
            Self::Rejected(message) => {
                Some((NotificationKind::Error, format!("Error: {message}")))
            }
            Self::Validation(message) => Some((NotificationKind::Warning, message.clone())),
            Self::Http(_) | Self::Api { .. } | Self::Parse(_) | Self::Storage(_) | Self::Url(_) => {
                Some((NotificationKind::Error, format!("Error while {action}")))
            }
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_has_no_toast() {
        assert!(ClientError::Unauthorized.toast("adding to cart").is_none());
    }

    #[test]
    fn test_rejected_toast_carries_server_message() {
        let err = ClientError::Rejected("out of stock".to_string());
        let (kind, message) = err.toast("adding to cart").expect("toast");
        assert_eq!(kind, NotificationKind::Error);
        assert_eq!(message, "Error: out of stock");
    }

    #[test]
    fn test_validation_toast_is_a_warning() {
        let err = ClientError::Validation("Select users to delete".to_string());
        let (kind, message) = err.toast("deleting users").expect("toast");
        assert_eq!(kind, NotificationKind::Warning);
        assert_eq!(message, "Select users to delete");
    }

    #[test]
    fn test_api_error_toast_is_generic() {
        let err = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        let (kind, message) = err.toast("adding to cart").expect("toast");
        assert_eq!(kind, NotificationKind::Error);
        assert_eq!(message, "Error while adding to cart");
    }
}
