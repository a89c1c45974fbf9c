//! dupper - registry client login/logout
//!
//! Credentials are kept in `$HOME/.dupper/config.json` (override with
//! `--config` or `DUPPER_CONFIG`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use dupper_cli::{commands, LoginArgs, LogoutArgs, TerminalPrompt};
use dupper_core::{load_config, CommonOptions, HttpAuthClient};

/// dupper - command line client for dupper registries
#[derive(Parser, Debug)]
#[command(name = "dupper")]
#[command(version)]
#[command(about = "Command line client for dupper registries")]
struct Cli {
    /// Enable debug mode
    #[arg(short = 'D', long, global = true)]
    debug: bool,

    /// Set the logging level ("debug"|"info"|"warn"|"error"|"fatal")
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: String,

    /// Location of client config files
    #[arg(long, global = true, value_name = "DIR")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in to a registry
    Login(LoginArgs),
    /// Log out from a registry
    Logout(LogoutArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = CommonOptions {
        debug: cli.debug,
        log_level: Some(cli.log_level.clone()),
        config_dir: cli.config.clone(),
    };

    let level = options.effective_log_level()?;
    dupper_cli::logging::init(level);

    let config_dir = options.config_dir()?;
    debug!("Using config directory {:?}", config_dir);

    let mut store = load_config(&config_dir)
        .await
        .with_context(|| format!("Failed to load config from {}", config_dir.display()))?;

    let mut stdout = std::io::stdout();

    match &cli.command {
        Command::Login(args) => {
            let client = HttpAuthClient::new()?;
            let mut prompt = TerminalPrompt::stdio();
            commands::login(args, &mut store, &client, &mut prompt, &mut stdout).await
        }
        Command::Logout(args) => commands::logout(args, &mut store, &mut stdout).await,
    }
}
