//! Shared request plumbing for the shop API.
//!
//! Every endpoint speaks the same `{success, data?, message?}` envelope, so
//! all clients funnel through [`ApiClient`]: it attaches the anti-forgery
//! token to every request, maps HTTP statuses onto the error taxonomy, and
//! unwraps the envelope.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use floret_core::ApiResponse;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Header carrying the anti-forgery token on every request.
const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Client for the flower shop's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// The anti-forgery token is installed as a default header so no call
    /// site can forget it.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(config.csrf_token.expose_secret())
            .map_err(|e| ClientError::Validation(format!("invalid anti-forgery token: {e}")))?;
        token.set_sensitive(true);
        headers.insert(CSRF_HEADER, token);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve a path like `/api/cart/count` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET a payload-bearing endpoint.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        self.execute(self.client.get(url)).await
    }

    /// POST a JSON body to an endpoint whose payload we don't need.
    pub async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_unit(self.client.post(url).json(body)).await
    }

    /// POST with no body.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_unit(self.client.post(url)).await
    }

    /// PUT with no body; parameters travel in the query string.
    pub async fn put(&self, path: &str) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_unit(self.client.put(url)).await
    }

    /// DELETE by path.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.endpoint(path)?;
        self.execute_unit(self.client.delete(url)).await
    }

    /// Send a request and unwrap the envelope into its payload.
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        envelope.into_result().map_err(ClientError::Rejected)
    }

    /// Send a request and check only the envelope's success flag.
    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let body = self.send(request).await?;
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(&body)?;
        if envelope.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "unknown server error".to_string()),
            ))
        }
    }

    /// Send a request, map non-success statuses, and return the body text.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Some(err) = map_error_status(status, &body) {
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "shop API returned non-success status"
            );
            return Err(err);
        }

        Ok(body)
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
///
/// 401 and 403 get dedicated variants so callers can show the sign-in prompt
/// and the permission-denied toast respectively; everything else non-2xx is
/// a generic API failure.
fn map_error_status(status: StatusCode, body: &str) -> Option<ClientError> {
    if status == StatusCode::UNAUTHORIZED {
        return Some(ClientError::Unauthorized);
    }
    if status == StatusCode::FORBIDDEN {
        return Some(ClientError::Forbidden);
    }
    if !status.is_success() {
        return Some(ClientError::Api {
            status: status.as_u16(),
            message: truncate(body),
        });
    }
    None
}

/// Keep logged/reported bodies short.
fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::path::PathBuf;

    use crate::config::CartBackendKind;

    fn test_client() -> ApiClient {
        let config = ClientConfig::new(
            "https://shop.example".parse().expect("valid url"),
            SecretString::from("token-9a1e20"),
            CartBackendKind::Remote,
            PathBuf::from("storage.json"),
        )
        .expect("valid config");
        ApiClient::new(&config).expect("client builds")
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = test_client();
        let url = client.endpoint("/api/cart/count").expect("joins");
        assert_eq!(url.as_str(), "https://shop.example/api/cart/count");
    }

    #[test]
    fn test_401_maps_to_unauthorized() {
        let err = map_error_status(StatusCode::UNAUTHORIZED, "").expect("error");
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn test_403_maps_to_forbidden() {
        let err = map_error_status(StatusCode::FORBIDDEN, "").expect("error");
        assert!(matches!(err, ClientError::Forbidden));
    }

    #[test]
    fn test_500_maps_to_api_error() {
        let err = map_error_status(StatusCode::INTERNAL_SERVER_ERROR, "boom").expect("error");
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[test]
    fn test_2xx_maps_to_nothing() {
        assert!(map_error_status(StatusCode::OK, "").is_none());
        assert!(map_error_status(StatusCode::CREATED, "").is_none());
    }

    #[test]
    fn test_truncate_caps_body_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).len(), 200);
    }
}
