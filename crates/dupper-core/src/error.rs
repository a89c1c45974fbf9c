//! Error types for dupper-core

use thiserror::Error;

/// Result type alias for credential store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Credential store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// A stored `auth` value could not be decoded back into username/password
    #[error("Invalid stored credential: {0}")]
    DecodeError(String),

    /// The config document itself is malformed
    #[error("Invalid config file: {0}")]
    ParseError(String),

    /// The store or client options were used incorrectly
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The auth endpoint could not be reached or rejected the request
    #[error("Error logging in to {server}: {message}")]
    AuthTransportError { server: String, message: String },

    /// The auth endpoint answered with something that is not the expected JSON
    #[error("Error parsing login response from {server}: {message}")]
    ResponseParseError { server: String, message: String },

    /// Credentials changed in memory but could not be written to disk
    #[error("Error saving credentials for {server}: {message}")]
    PersistError { server: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StoreError {
    /// Wrap a save failure with the server whose record was being changed
    pub fn persist(server: &str, source: StoreError) -> Self {
        StoreError::PersistError {
            server: server.to_string(),
            message: source.to_string(),
        }
    }
}
