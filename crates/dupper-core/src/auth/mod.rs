//! Login and logout flows against a registry auth endpoint

mod client;
mod login;
mod logout;
mod prompt;

pub use client::{AuthClient, HttpAuthClient, LoginData, LoginResponse, DEFAULT_AUTH_TIMEOUT};
pub use login::{resolve_server, run_login, LoginOptions, LoginOutcome, LoginStatus};
pub use logout::{run_logout, LogoutOutcome};
pub use prompt::{configure_auth, CredentialPrompt};
