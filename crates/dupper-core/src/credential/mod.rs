//! Credential records and the server-keyed store that holds them

mod store;
mod types;

pub use store::ConfigFile;
pub use types::*;
