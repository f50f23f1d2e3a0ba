//! Configuration Tests
//!
//! Config files, catalog files and file-backed storage on disk.

use nextstep_test_utils::SMALL_CATALOG_JSON;
use nextstep_tracker::{StorageBackend, ToastBoard, Tracker, TrackerConfig, TrackerError};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nextstep.toml");
    fs::write(
        &path,
        "[storage]\nbackend = \"memory\"\n\n[notifications]\nlifetime_secs = 2\n",
    )
    .unwrap();

    let config = TrackerConfig::load(&path).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.notifications.lifetime(), Duration::from_secs(2));
}

#[test]
fn test_missing_config_file() {
    let err = TrackerConfig::load("/nonexistent/nextstep.toml").unwrap_err();
    assert!(matches!(err, TrackerError::ConfigIo { .. }));
}

#[test]
fn test_catalog_file_replaces_builtin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, SMALL_CATALOG_JSON).unwrap();

    let catalog = TrackerConfig::new().with_catalog(&path).load_catalog().unwrap();
    assert_eq!(catalog.badges().len(), 1);
    assert_eq!(catalog.events().len(), 1);
}

#[test]
fn test_unsupported_catalog_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.txt");
    fs::write(&path, SMALL_CATALOG_JSON).unwrap();

    let err = TrackerConfig::new().with_catalog(&path).load_catalog().unwrap_err();
    assert!(matches!(err, TrackerError::Catalog(_)));
}

#[test]
fn test_file_backend_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = TrackerConfig::new().with_data_dir(dir.path().join("profile"));
    let catalog = config.load_catalog().unwrap();

    {
        let tracker = Tracker::new(&catalog, config.storage.open(), ToastBoard::new());
        tracker.complete("event-4").unwrap();
    }

    let tracker = Tracker::new(&catalog, config.storage.open(), ());
    assert!(tracker.is_completed("event-4"));
    assert_eq!(tracker.counters().volunteered_hours, 2);

    tracker.reset().unwrap();
    let tracker = Tracker::new(&catalog, config.storage.open(), ());
    assert!(tracker.completed().is_empty());
}
