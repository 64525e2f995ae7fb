//! The `{success, data?, message?}` response envelope used by every shop
//! API endpoint.

use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every API response body.
///
/// A 2xx status with `success: false` is an application-level failure; the
/// server-supplied `message` is what gets surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope into the payload, or the server's failure message.
    ///
    /// # Errors
    ///
    /// Returns the server-supplied message (or a fallback) when
    /// `success` is false or the payload is missing.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| "response missing data".to_string())
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "unknown server error".to_string()))
        }
    }
}
