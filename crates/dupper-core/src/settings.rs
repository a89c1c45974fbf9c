//! Client settings shared by every command
//!
//! Log level and config location are explicit values handed to whoever
//! needs them; nothing here touches global logging state.

use directories::BaseDirs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, StoreError};

/// Default registry host
pub const DEFAULT_HOST: &str = "http://test.dupper.co";

/// Default auth endpoint used when no server is given
pub const DEFAULT_AUTH_SERVER: &str = "http://test.dupper.co/api/v1/login";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "DUPPER_CONFIG";

/// Directory under `$HOME` holding the config file
pub const CONFIG_DIR_NAME: &str = ".dupper";

/// Logging verbosity accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Directive for a `tracing` env filter.
    ///
    /// `tracing` has no fatal level, so fatal maps to error.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(StoreError::ConfigError(format!(
                "Unable to parse logging level: {}",
                s
            ))),
        }
    }
}

/// Options common to every command
#[derive(Debug, Clone, Default)]
pub struct CommonOptions {
    /// Debug mode forces the debug log level
    pub debug: bool,
    /// Requested log level; `None` means info
    pub log_level: Option<String>,
    /// Explicit config directory
    pub config_dir: Option<PathBuf>,
}

impl CommonOptions {
    /// Effective log level after applying `debug`
    pub fn effective_log_level(&self) -> Result<LogLevel> {
        if self.debug {
            return Ok(LogLevel::Debug);
        }

        match self.log_level.as_deref() {
            Some(level) if !level.is_empty() => level.parse(),
            _ => Ok(LogLevel::Info),
        }
    }

    /// Config directory: explicit option, then `DUPPER_CONFIG`, then `$HOME/.dupper`
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }

        resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
    }
}

fn resolve_config_dir(env_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = env_override.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CONFIG_DIR_NAME))
        .ok_or_else(|| StoreError::ConfigError("Could not determine home directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_auth_server_under_default_host() {
        assert!(DEFAULT_AUTH_SERVER.starts_with(DEFAULT_HOST));
    }

    #[test]
    fn test_parse_log_levels() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Fatal);
        assert_eq!(LogLevel::Fatal.as_directive(), "error");
    }

    #[test]
    fn test_parse_unknown_level() {
        let result = "chatty".parse::<LogLevel>();
        assert!(matches!(result, Err(StoreError::ConfigError(_))));
    }

    #[test]
    fn test_effective_log_level() {
        let options = CommonOptions::default();
        assert_eq!(options.effective_log_level().unwrap(), LogLevel::Info);

        let options = CommonOptions {
            log_level: Some("warn".to_string()),
            ..Default::default()
        };
        assert_eq!(options.effective_log_level().unwrap(), LogLevel::Warn);

        let options = CommonOptions {
            debug: true,
            log_level: Some("error".to_string()),
            ..Default::default()
        };
        assert_eq!(options.effective_log_level().unwrap(), LogLevel::Debug);
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let options = CommonOptions {
            config_dir: Some(PathBuf::from("/tmp/dupper-test")),
            ..Default::default()
        };
        assert_eq!(options.config_dir().unwrap(), PathBuf::from("/tmp/dupper-test"));
    }

    #[test]
    fn test_env_override() {
        let dir = resolve_config_dir(Some(PathBuf::from("/srv/dupper"))).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/dupper"));
    }

    #[test]
    fn test_home_fallback() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let dir = resolve_config_dir(Some(PathBuf::new())).unwrap();
        assert_eq!(dir, home.join(CONFIG_DIR_NAME));

        let dir = resolve_config_dir(None).unwrap();
        assert_eq!(dir, home.join(CONFIG_DIR_NAME));
    }
}
