//! Gathering credentials for a login

use crate::credential::{AuthConfig, ConfigFile, SecretString};
use crate::error::{Result, StoreError};

/// Source of credentials not supplied on the command line
pub trait CredentialPrompt {
    /// Ask for a username; `default` is the one already stored for the server
    fn prompt_username(&mut self, server: &str, default: Option<&str>) -> Result<String>;

    /// Ask for a password without echoing it
    fn prompt_password(&mut self) -> Result<SecretString>;
}

/// Build the record to authenticate with for `server`.
///
/// Starts from whatever is stored for the server so uninterpreted fields
/// survive, fills in username and password from the flags or the prompt,
/// and drops any previous identity token.
pub fn configure_auth(
    store: &ConfigFile,
    server: &str,
    flag_user: &str,
    flag_password: &SecretString,
    prompt: &mut dyn CredentialPrompt,
) -> Result<AuthConfig> {
    let mut auth_config = store.get_auth_config(server);

    let mut username = flag_user.trim().to_string();
    if username.is_empty() {
        let stored = Some(auth_config.username.as_str()).filter(|u| !u.is_empty());
        let entered = prompt.prompt_username(server, stored)?;
        username = entered.trim().to_string();
        if username.is_empty() {
            username = stored.unwrap_or_default().to_string();
        }
    }
    if username.is_empty() {
        return Err(StoreError::ConfigError("Non-null Username Required".to_string()));
    }

    let password = if flag_password.is_empty() {
        prompt.prompt_password()?
    } else {
        SecretString::new(flag_password.expose().to_string())
    };
    if password.is_empty() {
        return Err(StoreError::ConfigError("Password Required".to_string()));
    }

    auth_config.username = username;
    auth_config.password = password.expose().to_string();
    auth_config.server_address = server.to_string();
    auth_config.identity_token.clear();

    Ok(auth_config)
}
