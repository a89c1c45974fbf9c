//! Persistence of the credential store to the client config file

mod config_file;

pub use config_file::{load_config, CONFIG_FILE_NAME};
