//! Logout: forget the stored credentials for a server

use tracing::info;

use crate::credential::ConfigFile;
use crate::error::{Result, StoreError};

/// Result of a logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Nothing was stored for the server; the store is unchanged
    NotLoggedIn(String),
    /// The record was removed and the config saved
    Removed(String),
}

/// Remove the record for `server` and save.
///
/// Logging out of a server with no record is a successful no-op.
pub async fn run_logout(store: &mut ConfigFile, server: &str) -> Result<LogoutOutcome> {
    if store.auth_config(server).is_none() {
        info!("Not logged in to {}", server);
        return Ok(LogoutOutcome::NotLoggedIn(server.to_string()));
    }

    store.del_auth_config(server);
    store
        .save()
        .await
        .map_err(|e| StoreError::persist(server, e))?;

    info!("Removed login information for {}", server);
    Ok(LogoutOutcome::Removed(server.to_string()))
}
