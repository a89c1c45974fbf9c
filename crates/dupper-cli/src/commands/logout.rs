//! `dupper logout` - log out from a registry

use anyhow::Result;
use clap::Args;
use std::io::Write;

use dupper_core::{resolve_server, run_logout, ConfigFile, LogoutOutcome};

/// Log out from a registry.
/// If no server is specified, the default auth endpoint is used.
#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Registry auth endpoint
    pub server: Option<String>,
}

/// Remove stored credentials for the server and report what happened
pub async fn execute(args: &LogoutArgs, store: &mut ConfigFile, out: &mut dyn Write) -> Result<()> {
    let server = resolve_server(args.server.as_deref());

    match run_logout(store, &server).await? {
        LogoutOutcome::NotLoggedIn(server) => writeln!(out, "Not logged in to {}", server)?,
        LogoutOutcome::Removed(server) => {
            writeln!(out, "Removed login information for {}", server)?
        }
    }

    Ok(())
}
