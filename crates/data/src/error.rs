use dex_domain::error::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or interpreting the address record.
#[derive(Debug, Error)]
pub enum AddressBookError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed address record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("address record has no entry for {0:?}")]
    MissingKey(String),

    #[error("entry {key:?} is not an address: {source}")]
    InvalidAddress {
        key: String,
        #[source]
        source: ParseError,
    },
}
