//! Client for the remote auth endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::de::null_as_default;
use crate::error::{Result, StoreError};

/// Default timeout for the auth request
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Exchanges credentials with an auth endpoint
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// POST the credentials to `server` and return the raw response body.
    ///
    /// Transport failures and non-2xx statuses are `AuthTransportError`.
    async fn authenticate(&self, server: &str, username: &str, password: &str) -> Result<String>;
}

/// Auth endpoint client over HTTP(S)
pub struct HttpAuthClient {
    client: Client,
}

impl HttpAuthClient {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_AUTH_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn authenticate(&self, server: &str, username: &str, password: &str) -> Result<String> {
        let transport_error = |message: String| StoreError::AuthTransportError {
            server: server.to_string(),
            message,
        };

        debug!("POST {} for user {}", server, username);

        let response = self
            .client
            .post(server)
            .form(&[("email", username), ("password", password)])
            .send()
            .await
            .map_err(|e| transport_error(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(format!("Failed to read response: {}", e)))?;

        debug!("Response status: {}", status);

        if !status.is_success() {
            error!("Login request to {} failed with status {}", server, status);
            return Err(transport_error(format!("HTTP {} - {}", status, body)));
        }

        Ok(body)
    }
}

/// JSON body returned by the auth endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    pub data: Option<LoginData>,
}

impl LoginResponse {
    /// Whether the endpoint accepted the credentials
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Issued token, empty when none was returned
    pub fn auth_token(&self) -> &str {
        self.data.as_ref().map(|d| d.auth_token.as_str()).unwrap_or("")
    }
}

/// `data` object of a login response
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginData {
    #[serde(deserialize_with = "null_as_default")]
    pub auth_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
}

impl std::fmt::Debug for LoginData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginData")
            .field("auth_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}
