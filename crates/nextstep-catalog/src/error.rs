//! Error types for catalog loading
//!
//! [`CatalogError`] means the document could not be read at all.
//! [`CatalogIssue`] describes one entry that was dropped while the rest of
//! the catalog loaded.

use crate::badge::BadgeId;
use crate::event::EventId;
use std::path::PathBuf;

/// Errors reading a catalog document
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error reading the document
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON for the catalog shape
    #[error("invalid json catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Document is not valid YAML for the catalog shape
    #[error("invalid yaml catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension has no parser
    #[error("unsupported catalog format: '{0}'")]
    UnsupportedFormat(String),
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A catalog entry that failed validation and was skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogIssue {
    /// Badge tracks a counter outside the progress schema
    #[error("badge {badge} tracks unknown progress key '{key}'")]
    UnknownBadgeKey { badge: BadgeId, key: String },

    /// Event contributes to a counter outside the progress schema
    #[error("event '{event}' contributes to unknown progress key '{key}'")]
    UnknownEventKey { event: EventId, key: String },

    /// Badge threshold is zero
    #[error("badge {0} has a zero threshold")]
    ZeroThreshold(BadgeId),

    /// Badge id already used
    #[error("duplicate badge id {0}")]
    DuplicateBadge(BadgeId),

    /// Event id already used
    #[error("duplicate event id '{0}'")]
    DuplicateEvent(EventId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_display() {
        let issue = CatalogIssue::UnknownBadgeKey {
            badge: BadgeId(21),
            key: "karmaPoints".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "badge #21 tracks unknown progress key 'karmaPoints'"
        );
    }

    #[test]
    fn unsupported_format_display() {
        let err = CatalogError::UnsupportedFormat("xml".to_string());
        assert_eq!(err.to_string(), "unsupported catalog format: 'xml'");
    }
}
