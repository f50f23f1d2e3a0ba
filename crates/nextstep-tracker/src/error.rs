//! Error types for the tracker

use nextstep_catalog::CatalogError;
use nextstep_store::StoreError;
use std::path::PathBuf;

/// Errors surfaced by the tracker
///
/// A `Storage` error from a mutation means the write was refused and the
/// records were put back the way they were.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A progress or ledger write failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Catalog file could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("io error reading config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrackerError {
    /// Create config IO error for path
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from the storage medium
    #[inline]
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<toml::de::Error> for TrackerError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nextstep_store::StorageError;

    #[test]
    fn storage_errors_wrap() {
        let err: TrackerError =
            StoreError::from(StorageError::unavailable("quota exceeded")).into();
        assert!(err.is_storage());
        assert_eq!(
            err.to_string(),
            "storage error: storage error: storage unavailable: quota exceeded"
        );
    }

    #[test]
    fn config_io_display() {
        let err = TrackerError::config_io(
            "/etc/nextstep.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(!err.is_storage());
        assert!(err.to_string().contains("/etc/nextstep.toml"));
    }
}
