//! `auth` field codec
//!
//! Credentials are persisted as the standard (padded) base64 encoding of
//! `username:password`. This is obfuscation, not encryption; it matches what
//! other registry tooling writes into the same config format.

use base64::Engine;

use crate::error::{Result, StoreError};

/// Encode a username/password pair into the `auth` string.
///
/// Returns an empty string when both parts are empty so that token-only
/// records do not get a meaningless `auth` entry.
pub fn encode_auth(username: &str, password: &str) -> String {
    if username.is_empty() && password.is_empty() {
        return String::new();
    }

    let auth_str = format!("{}:{}", username, password);
    base64::engine::general_purpose::STANDARD.encode(auth_str.as_bytes())
}

/// Decode an `auth` string back into `(username, password)`.
///
/// The decoded text is split on the first `:` only, so passwords may contain
/// colons. Trailing NUL bytes left by fixed-size buffers in other
/// implementations are stripped from the password.
pub fn decode_auth(auth_str: &str) -> Result<(String, String)> {
    if auth_str.is_empty() {
        return Ok((String::new(), String::new()));
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(auth_str)
        .map_err(|e| StoreError::DecodeError(format!("Base64 decode error: {}", e)))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|e| StoreError::DecodeError(format!("Auth is not valid UTF-8: {}", e)))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| StoreError::DecodeError("Invalid auth configuration file".to_string()))?;

    Ok((
        username.to_string(),
        password.trim_end_matches('\0').to_string(),
    ))
}
