//! In-memory form of the client config file

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::AuthConfig;
use crate::codec::{decode_auth, encode_auth};
use crate::de::null_entries_as_default;
use crate::error::{Result, StoreError};

/// The client config file: server-keyed credential records plus any
/// preferences this client does not interpret.
///
/// After a successful load no record has `auth` populated; the on-disk
/// encoding only exists inside [`ConfigFile::save_to_writer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "auths", default, deserialize_with = "null_entries_as_default")]
    auth_configs: BTreeMap<String, AuthConfig>,

    /// Every other top-level key (formats, headers, helper settings)
    #[serde(flatten)]
    extra: Map<String, Value>,

    #[serde(skip)]
    filename: Option<PathBuf>,
}

impl ConfigFile {
    /// Create an empty store associated with `filename`
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Default::default()
        }
    }

    /// Path the store saves to, if one is associated
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<PathBuf>) {
        self.filename = Some(filename.into());
    }

    /// Parse a config document and decode every record's `auth` field.
    ///
    /// The store is only replaced once the whole document decoded; on error
    /// it is left exactly as it was. The associated filename is kept.
    pub fn load_from_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut parsed: ConfigFile = serde_json::from_reader(reader)
            .map_err(|e| StoreError::ParseError(e.to_string()))?;

        for (address, config) in parsed.auth_configs.iter_mut() {
            let (username, password) = decode_auth(&config.auth).map_err(|e| match e {
                StoreError::DecodeError(msg) => {
                    StoreError::DecodeError(format!("{}: {}", address, msg))
                }
                other => other,
            })?;
            config.username = username;
            config.password = password;
            config.auth.clear();
            config.server_address = address.clone();
        }

        debug!("Loaded {} auth entries from config", parsed.auth_configs.len());

        self.auth_configs = parsed.auth_configs;
        self.extra = parsed.extra;
        Ok(())
    }

    /// Insert or overwrite the record for `address`. Does not persist.
    pub fn add_auth_config(&mut self, address: &str, config: AuthConfig) {
        self.auth_configs.insert(address.to_string(), config);
    }

    /// Remove the record for `address`; absent addresses are ignored.
    pub fn del_auth_config(&mut self, address: &str) {
        self.auth_configs.remove(address);
    }

    /// Record for `address`, or an empty record when there is none.
    ///
    /// Use [`ConfigFile::auth_config`] when absence matters.
    pub fn get_auth_config(&self, address: &str) -> AuthConfig {
        self.auth_configs.get(address).cloned().unwrap_or_default()
    }

    /// Record for `address` if one is stored
    pub fn auth_config(&self, address: &str) -> Option<&AuthConfig> {
        self.auth_configs.get(address)
    }

    /// Whether any credentials are stored
    pub fn contains_auth(&self) -> bool {
        !self.auth_configs.is_empty()
    }

    /// All records keyed by server address
    pub fn all_auth_configs(&self) -> &BTreeMap<String, AuthConfig> {
        &self.auth_configs
    }

    /// Preferences and other top-level keys carried through unchanged
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Serialize the store with credentials encoded into `auth`.
    ///
    /// Encoding happens on a shadow copy of the records; `self` is never
    /// modified. Output is tab-indented with sorted keys, so saving the same
    /// data twice yields identical bytes.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let shadow: BTreeMap<String, AuthConfig> = self
            .auth_configs
            .iter()
            .map(|(address, config)| {
                let mut encoded = config.clone();
                encoded.auth = encode_auth(&config.username, &config.password);
                encoded.username.clear();
                encoded.password.clear();
                encoded.server_address.clear();
                (address.clone(), encoded)
            })
            .collect();

        let document = ConfigFile {
            auth_configs: shadow,
            extra: self.extra.clone(),
            filename: None,
        };

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        document.serialize(&mut serializer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_DOC: &str = r#"{
        "auths": {
            "https://reg.example/api/v1/login": { "auth": "YWxpY2U6c2VjcmV0" }
        }
    }"#;

    fn save_to_string(config: &ConfigFile) -> String {
        let mut buf = Vec::new();
        config.save_to_writer(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_load_decodes_auth() {
        let mut config = ConfigFile::default();
        config.load_from_reader(ALICE_DOC.as_bytes()).unwrap();

        let record = config.auth_config("https://reg.example/api/v1/login").unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.password, "secret");
        assert_eq!(record.server_address, "https://reg.example/api/v1/login");
        assert!(record.auth.is_empty());
    }

    #[test]
    fn test_load_ignores_missing_auths() {
        let mut config = ConfigFile::default();
        config.load_from_reader(r#"{"psFormat": "table"}"#.as_bytes()).unwrap();
        assert!(!config.contains_auth());

        config.load_from_reader(r#"{"auths": null}"#.as_bytes()).unwrap();
        assert!(!config.contains_auth());
    }

    #[test]
    fn test_load_null_fields_as_empty() {
        let mut config = ConfigFile::default();
        config
            .load_from_reader(r#"{"auths":{"reg.example":{"auth":null,"identitytoken":"T"}}}"#.as_bytes())
            .unwrap();

        let record = config.auth_config("reg.example").unwrap();
        assert!(record.username.is_empty());
        assert!(record.password.is_empty());
        assert_eq!(record.identity_token, "T");

        config
            .load_from_reader(r#"{"auths":{"reg.example":null}}"#.as_bytes())
            .unwrap();

        let record = config.auth_config("reg.example").unwrap();
        assert_eq!(record.server_address, "reg.example");
        assert!(record.identity_token.is_empty());
        assert!(record.username.is_empty());
    }

    #[test]
    fn test_load_malformed_document() {
        let mut config = ConfigFile::default();
        let result = config.load_from_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(StoreError::ParseError(_))));
    }

    #[test]
    fn test_load_corrupt_auth_leaves_store_untouched() {
        let mut config = ConfigFile::default();
        config.load_from_reader(ALICE_DOC.as_bytes()).unwrap();
        let before = config.clone();

        let bad = r#"{
            "auths": {
                "a.example": { "auth": "Ym9iOnB3" },
                "b.example": { "auth": "%%%not-base64%%%" }
            }
        }"#;
        let result = config.load_from_reader(bad.as_bytes());
        assert!(matches!(result, Err(StoreError::DecodeError(_))));
        assert_eq!(config, before);

        // decodes fine as base64 but has no separator
        let no_colon = r#"{ "auths": { "c.example": { "auth": "bm9jb2xvbg==" } } }"#;
        let result = config.load_from_reader(no_colon.as_bytes());
        assert!(matches!(result, Err(StoreError::DecodeError(_))));
        assert_eq!(config, before);
    }

    #[test]
    fn test_add_get_del() {
        let mut config = ConfigFile::default();
        assert!(!config.contains_auth());
        assert!(config.auth_config("reg.example").is_none());
        assert_eq!(config.get_auth_config("reg.example"), AuthConfig::default());

        config.add_auth_config("reg.example", AuthConfig::new("alice", "one"));
        config.add_auth_config("reg.example", AuthConfig::new("alice", "two"));
        assert_eq!(config.all_auth_configs().len(), 1);
        assert_eq!(config.get_auth_config("reg.example").password, "two");
        assert!(config.contains_auth());

        config.del_auth_config("reg.example");
        config.del_auth_config("never.added");
        assert!(!config.contains_auth());
    }

    #[test]
    fn test_save_encodes_without_mutating() {
        let mut config = ConfigFile::default();
        let mut record = AuthConfig::new("alice", "secret");
        record.server_address = "reg.example".to_string();
        config.add_auth_config("reg.example", record);
        let before = config.clone();

        let output = save_to_string(&config);
        assert_eq!(config, before);

        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "auths": { "reg.example": { "auth": "YWxpY2U6c2VjcmV0" } } })
        );
    }

    #[test]
    fn test_save_token_record() {
        let mut config = ConfigFile::default();
        let mut record = AuthConfig::new("alice", "secret");
        record.set_identity_token("T");
        config.add_auth_config("reg.example", record);

        let json: Value = serde_json::from_str(&save_to_string(&config)).unwrap();
        let entry = &json["auths"]["reg.example"];
        // "alice:"
        assert_eq!(entry["auth"], "YWxpY2U6");
        assert_eq!(entry["identitytoken"], "T");
        assert!(entry.get("password").is_none());
        assert!(entry.get("username").is_none());
    }

    #[test]
    fn test_save_is_tab_indented_and_stable() {
        let mut config = ConfigFile::default();
        config.add_auth_config("z.example", AuthConfig::new("zed", "z"));
        config.add_auth_config("a.example", AuthConfig::new("amy", "a"));

        let first = save_to_string(&config);
        let second = save_to_string(&config);
        assert_eq!(first, second);
        assert!(first.contains("\n\t\"auths\""));
        assert!(first.find("a.example").unwrap() < first.find("z.example").unwrap());
    }

    #[test]
    fn test_round_trip_preserves_extra_fields() {
        let doc = r#"{
            "auths": {
                "reg.example": { "auth": "YWxpY2U6c2VjcmV0", "identitytoken": "T", "x-note": "keep" }
            },
            "psFormat": "table {{.ID}}",
            "HttpHeaders": { "User-Agent": "dupper" }
        }"#;

        let mut config = ConfigFile::default();
        config.load_from_reader(doc.as_bytes()).unwrap();
        assert_eq!(config.extra().get("psFormat"), Some(&Value::from("table {{.ID}}")));

        let saved = save_to_string(&config);
        let mut reloaded = ConfigFile::default();
        reloaded.load_from_reader(saved.as_bytes()).unwrap();

        assert_eq!(reloaded, config);
        let record = reloaded.auth_config("reg.example").unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.password, "secret");
        assert_eq!(record.identity_token, "T");
        assert_eq!(record.extra.get("x-note"), Some(&Value::from("keep")));
    }
}
