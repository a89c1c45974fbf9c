//! Credential record definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::de::null_as_default;

/// One server's stored identity, as kept under `auths` in the config file.
///
/// In memory `username`/`password` hold the live values and `auth` is empty.
/// On disk only `auth` carries them (see [`crate::codec`]).
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub password: String,

    /// Base64 `username:password`, only populated in the serialized form
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub auth: String,

    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(
        rename = "serveraddress",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub server_address: String,

    /// Bearer token issued by the auth endpoint; supersedes the password
    #[serde(
        rename = "identitytoken",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub identity_token: String,

    #[serde(
        rename = "registrytoken",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub registry_token: String,

    /// Fields this client does not interpret, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthConfig {
    /// Create a record from a username/password pair
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    /// Whether the record holds a token issued by the auth endpoint
    pub fn has_identity_token(&self) -> bool {
        !self.identity_token.is_empty()
    }

    /// Replace the password with an identity token.
    ///
    /// A record carrying a token never keeps a plaintext password.
    pub fn set_identity_token(&mut self, token: &str) {
        self.password.zeroize();
        self.identity_token = token.to_string();
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                ""
            } else {
                "[REDACTED]"
            }
        }

        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("auth", &redact(&self.auth))
            .field("email", &self.email)
            .field("server_address", &self.server_address)
            .field("identity_token", &redact(&self.identity_token))
            .field("registry_token", &redact(&self.registry_token))
            .field("extra", &self.extra)
            .finish()
    }
}

/// Password held outside the store - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the secret value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}
