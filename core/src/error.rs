use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the persisted index file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no index file at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("i/o error on index file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index file {} does not match the expected schema", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("index file {} is inconsistent: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("failed to encode index")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
