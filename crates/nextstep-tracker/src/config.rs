//! Tracker configuration
//!
//! Read from a TOML file; every field has a default so an empty file (or no
//! file) is a valid configuration.
//!
//! ```toml
//! catalog = "catalog.yaml"
//!
//! [storage]
//! backend = "file"
//! data_dir = ".nextstep"
//!
//! [notifications]
//! lifetime_secs = 5
//!
//! [log]
//! level = "debug"
//! json = false
//! ```

use crate::error::{TrackerError, TrackerResult};
use nextstep_catalog::Catalog;
use nextstep_store::{FileStorage, MemoryStorage, SessionFallback, Storage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where progress records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory, gone on exit
    Memory,
    /// One JSON file per record under `data_dir`
    #[default]
    File,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Profile directory for the file backend
    pub data_dir: PathBuf,
    /// Keep working in memory when the file backend fails
    pub fallback_to_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from(".nextstep"),
            fallback_to_memory: true,
        }
    }
}

impl StorageConfig {
    /// Open the configured medium
    #[must_use]
    pub fn open(&self) -> Arc<dyn Storage> {
        match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File if self.fallback_to_memory => {
                Arc::new(SessionFallback::new(FileStorage::new(&self.data_dir)))
            }
            StorageBackend::File => Arc::new(FileStorage::new(&self.data_dir)),
        }
    }
}

/// Badge acknowledgement settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Seconds an acknowledgement stays visible
    pub lifetime_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { lifetime_secs: 5 }
    }
}

impl NotificationConfig {
    /// Lifetime as a duration
    #[inline]
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_secs)
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Catalog file (JSON or YAML); the built-in catalog when unset
    pub catalog: Option<PathBuf>,
    pub storage: StorageConfig,
    pub notifications: NotificationConfig,
    pub log: LogConfig,
}

impl TrackerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML
    pub fn from_toml_str(content: &str) -> TrackerResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| TrackerError::config_io(path, e))?;
        tracing::debug!(path = %path.display(), "loading tracker config");
        Self::from_toml_str(&content)
    }

    /// Reject values no component can work with
    pub fn validate(&self) -> TrackerResult<()> {
        if self.notifications.lifetime_secs == 0 {
            return Err(TrackerError::Config(
                "notifications.lifetime_secs must be greater than 0".to_string(),
            ));
        }
        if self.storage.backend == StorageBackend::File
            && self.storage.data_dir.as_os_str().is_empty()
        {
            return Err(TrackerError::Config(
                "storage.data_dir must be set for the file backend".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(TrackerError::Config("log.level must not be empty".to_string()));
        }
        Ok(())
    }

    /// With storage backend
    #[inline]
    #[must_use]
    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.storage.backend = backend;
        self
    }

    /// With profile directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = dir.into();
        self
    }

    /// With catalog file
    #[inline]
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    /// With acknowledgement lifetime
    #[inline]
    #[must_use]
    pub fn with_notification_lifetime(mut self, lifetime: Duration) -> Self {
        self.notifications.lifetime_secs = lifetime.as_secs();
        self
    }

    /// With JSON log output
    #[inline]
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.log.json = json;
        self
    }

    /// Load the configured catalog
    ///
    /// Catalog entries that fail validation are dropped and logged by the
    /// loader; only an unreadable or unparsable file is an error.
    pub fn load_catalog(&self) -> TrackerResult<Catalog> {
        match &self.catalog {
            Some(path) => Ok(Catalog::load(path)?.catalog),
            None => Ok(Catalog::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(TrackerConfig::from_toml_str("").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn parses_all_sections() {
        let config = TrackerConfig::from_toml_str(
            r#"
            catalog = "site/catalog.yaml"

            [storage]
            backend = "memory"

            [notifications]
            lifetime_secs = 8

            [log]
            level = "nextstep_tracker=debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog, Some(PathBuf::from("site/catalog.yaml")));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, PathBuf::from(".nextstep"));
        assert_eq!(config.notifications.lifetime(), Duration::from_secs(8));
        assert!(config.log.json);
    }

    #[test]
    fn zero_lifetime_is_rejected() {
        let err = TrackerConfig::from_toml_str("[notifications]\nlifetime_secs = 0\n").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = TrackerConfig::from_toml_str("[storage]\nbackend = \"cloud\"\n").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn builders_override() {
        let config = TrackerConfig::new()
            .with_backend(StorageBackend::Memory)
            .with_data_dir("/tmp/profile")
            .with_catalog("catalog.json")
            .with_notification_lifetime(Duration::from_secs(3))
            .with_json_logs(true);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/profile"));
        assert_eq!(config.catalog, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.notifications.lifetime_secs, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_catalog_is_builtin() {
        let catalog = TrackerConfig::default().load_catalog().unwrap();
        assert_eq!(&catalog, Catalog::builtin());
    }

    #[test]
    fn memory_backend_round_trips() {
        let storage = TrackerConfig::new().with_backend(StorageBackend::Memory).storage.open();
        storage.set("userProgress", "{}").unwrap();
        assert_eq!(storage.get("userProgress").unwrap().as_deref(), Some("{}"));
    }
}
