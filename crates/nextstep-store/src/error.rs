//! Error types for the persistence layer

use std::path::PathBuf;

/// Errors raised by a storage medium
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Medium refuses reads or writes (disabled, over quota, read-only)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Key cannot be mapped onto the medium
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// IO error on a file-backed medium
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Errors persisting a record
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying medium failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record could not be encoded
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
