//! # dupper-core
//!
//! Local credential store for the dupper registry client:
//! - The client config file model, keyed by server address
//! - The base64 `auth` codec applied when the file is written
//! - Owner-only, atomically replaced persistence
//! - Login and logout flows against a remote auth endpoint

pub mod auth;
pub mod codec;
pub mod credential;
mod de;
pub mod error;
pub mod settings;
pub mod storage;

pub use auth::{
    resolve_server, run_login, run_logout, AuthClient, CredentialPrompt, HttpAuthClient,
    LoginOptions, LoginOutcome, LoginStatus, LogoutOutcome,
};
pub use codec::{decode_auth, encode_auth};
pub use credential::{AuthConfig, ConfigFile, SecretString};
pub use error::{Result, StoreError};
pub use settings::{CommonOptions, LogLevel, DEFAULT_AUTH_SERVER, DEFAULT_HOST};
pub use storage::{load_config, CONFIG_FILE_NAME};
