//! On-disk persistence for the config file
//!
//! The file lives in an owner-only directory and is itself owner-only.
//! Writes go to a sibling temp file which is renamed over the target, so a
//! crash mid-save never leaves a truncated config behind.

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::credential::ConfigFile;
use crate::error::{Result, StoreError};

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Load the config file from `dir`.
///
/// A missing (or blank) file yields an empty store that is already
/// associated with the path, so a first login can save to it.
pub async fn load_config(dir: &Path) -> Result<ConfigFile> {
    let path = dir.join(CONFIG_FILE_NAME);
    let mut config = ConfigFile::new(&path);

    let contents = match tokio::fs::read(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No existing config file at {:?}", path);
            return Ok(config);
        }
        Err(e) => return Err(io_context(&path, e)),
    };

    if contents.iter().all(u8::is_ascii_whitespace) {
        debug!("Config file {:?} is empty", path);
        return Ok(config);
    }

    config
        .load_from_reader(contents.as_slice())
        .map_err(|e| match e {
            StoreError::ParseError(msg) => {
                StoreError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

    Ok(config)
}

impl ConfigFile {
    /// Encode and write all credentials to the associated file.
    ///
    /// Fails with `ConfigError` before touching the filesystem when no
    /// filename is associated. The in-memory store is never modified.
    pub async fn save(&self) -> Result<()> {
        let path = self
            .filename()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                StoreError::ConfigError("Can't save config with empty filename".to_string())
            })?;

        let mut contents = Vec::new();
        self.save_to_writer(&mut contents)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_private_dir(dir).await?;
        }

        let temp_path = temp_path_for(path);
        if let Err(e) = write_private_file(&temp_path, &contents).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(io_context(path, e));
        }

        debug!(
            "Saved {} auth entries to {:?}",
            self.all_auth_configs().len(),
            path
        );
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

async fn create_private_dir(dir: &Path) -> Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);

    builder.create(dir).await.map_err(|e| io_context(dir, e))
}

async fn write_private_file(path: &Path, contents: &[u8]) -> Result<()> {
    // a stale temp file would keep its old permissions
    let _ = tokio::fs::remove_file(path).await;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(path).await.map_err(|e| io_context(path, e))?;
    file.write_all(contents)
        .await
        .map_err(|e| io_context(path, e))?;
    file.sync_all().await.map_err(|e| io_context(path, e))?;
    Ok(())
}

fn io_context(path: &Path, err: io::Error) -> StoreError {
    StoreError::IoError(io::Error::new(
        err.kind(),
        format!("{}: {}", path.display(), err),
    ))
}
