//! # dupper-cli
//!
//! Command layer for the dupper registry client. Parses flags, prompts for
//! missing credentials and reports results; all credential handling lives in
//! `dupper-core`.

pub mod commands;
pub mod logging;
pub mod prompt;

pub use commands::{LoginArgs, LogoutArgs};
pub use prompt::TerminalPrompt;
