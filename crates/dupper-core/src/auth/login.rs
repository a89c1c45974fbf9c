//! Login: exchange credentials with the auth endpoint and store the result

use tracing::{info, warn};

use super::client::{AuthClient, LoginResponse};
use super::prompt::{configure_auth, CredentialPrompt};
use crate::credential::{ConfigFile, SecretString};
use crate::error::{Result, StoreError};
use crate::settings::DEFAULT_AUTH_SERVER;

/// Server to talk to: the explicit argument, or the default auth endpoint
pub fn resolve_server(arg: Option<&str>) -> String {
    match arg.map(str::trim) {
        Some(server) if !server.is_empty() => server.to_string(),
        _ => DEFAULT_AUTH_SERVER.to_string(),
    }
}

/// Options for a login, as collected by the command layer
#[derive(Debug, Default)]
pub struct LoginOptions {
    pub server_address: Option<String>,
    pub username: String,
    pub password: SecretString,
}

/// How the auth endpoint answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    /// Endpoint reported success; the issued token replaced the password
    Authenticated,
    /// Endpoint answered without success; credentials were stored as entered
    Rejected,
}

/// Result of a completed login flow
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub server: String,
    pub status: LoginStatus,
    pub message: String,
    /// Raw response body from the endpoint
    pub body: String,
    response_status: String,
}

impl LoginOutcome {
    /// Whether the response carried a status worth showing to the user
    pub fn has_response_status(&self) -> bool {
        !self.response_status.is_empty()
    }
}

/// Run the login flow against `store`.
///
/// Resolves the server, gathers credentials, authenticates once (no
/// retries), records the outcome and saves. A rejected login is not an
/// error: whatever credentials were entered are stored. A save failure after
/// the exchange is reported as `PersistError`.
pub async fn run_login(
    store: &mut ConfigFile,
    client: &dyn AuthClient,
    prompt: &mut dyn CredentialPrompt,
    options: &LoginOptions,
) -> Result<LoginOutcome> {
    let server = resolve_server(options.server_address.as_deref());

    let mut auth_config = configure_auth(
        store,
        &server,
        &options.username,
        &options.password,
        prompt,
    )?;

    info!("Logging in to {} as {}", server, auth_config.username);

    let body = client
        .authenticate(&server, &auth_config.username, &auth_config.password)
        .await?;

    let response: LoginResponse =
        serde_json::from_str(&body).map_err(|e| StoreError::ResponseParseError {
            server: server.clone(),
            message: e.to_string(),
        })?;

    let status = if response.is_success() {
        auth_config.set_identity_token(response.auth_token());
        LoginStatus::Authenticated
    } else {
        warn!(
            "Login to {} returned status {:?}: {}",
            server, response.status, response.message
        );
        LoginStatus::Rejected
    };

    store.add_auth_config(&server, auth_config);
    store
        .save()
        .await
        .map_err(|e| StoreError::persist(&server, e))?;

    info!("Stored credentials for {}", server);

    Ok(LoginOutcome {
        server,
        status,
        message: response.message,
        body,
        response_status: response.status,
    })
}
