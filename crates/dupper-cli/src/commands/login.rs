//! `dupper login` - log in to a registry

use anyhow::Result;
use clap::Args;
use std::io::Write;

use dupper_core::{
    run_login, AuthClient, ConfigFile, CredentialPrompt, LoginOptions, LoginStatus, SecretString,
};

/// Log in to a registry.
/// If no server is specified, the default auth endpoint is used.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Registry auth endpoint
    pub server: Option<String>,

    /// Email
    #[arg(short, long, default_value = "")]
    pub email: String,

    /// Password
    #[arg(short, long, env = "DUPPER_PASSWORD", hide_env_values = true, default_value = "")]
    pub password: String,
}

impl LoginArgs {
    fn to_options(&self) -> LoginOptions {
        LoginOptions {
            server_address: self.server.clone(),
            username: self.email.clone(),
            password: SecretString::new(self.password.clone()),
        }
    }
}

/// Run the login flow and echo the endpoint's response
pub async fn execute(
    args: &LoginArgs,
    store: &mut ConfigFile,
    client: &dyn AuthClient,
    prompt: &mut dyn CredentialPrompt,
    out: &mut dyn Write,
) -> Result<()> {
    let outcome = run_login(store, client, prompt, &args.to_options()).await?;

    if outcome.has_response_status() {
        writeln!(out, "{}", outcome.body)?;
    }

    if outcome.status == LoginStatus::Rejected {
        tracing::warn!("Login to {} was not accepted", outcome.server);
    }

    Ok(())
}
