//! Progress Store
//!
//! Durable home of one user's [`ProgressCounters`]. Reads never fail: a
//! missing, unreadable or malformed record reads as the all-zero defaults.

use crate::error::StoreResult;
use crate::storage::Storage;
use nextstep_catalog::ProgressCounters;

/// Storage key of the progress record
pub const PROGRESS_RECORD_KEY: &str = "userProgress";

/// Load/save access to the progress record
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    storage: S,
}

impl<S: Storage> ProgressStore<S> {
    /// Create store over a medium
    #[inline]
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying medium
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current counters, or defaults when nothing usable is stored
    #[must_use]
    pub fn load(&self) -> ProgressCounters {
        let raw = match self.storage.get(PROGRESS_RECORD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressCounters::default(),
            Err(error) => {
                tracing::warn!(%error, "progress record unreadable, using defaults");
                return ProgressCounters::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|error| {
            tracing::warn!(%error, "progress record malformed, using defaults");
            ProgressCounters::default()
        })
    }

    /// Replace the stored record
    ///
    /// The record is written with a single `set`, so a later `load` sees
    /// either the old counters or these.
    pub fn save(&self, counters: &ProgressCounters) -> StoreResult<()> {
        let raw = serde_json::to_string(counters)?;
        self.storage.set(PROGRESS_RECORD_KEY, &raw)?;
        tracing::trace!(record = %raw, "progress saved");
        Ok(())
    }

    /// Write back counters a failed update replaced
    ///
    /// Unlike [`save`](Self::save) this reaches the durable medium even
    /// after a [`SessionFallback`](crate::SessionFallback) has switched to
    /// memory.
    pub fn restore(&self, counters: &ProgressCounters) -> StoreResult<()> {
        let raw = serde_json::to_string(counters)?;
        self.storage.restore(PROGRESS_RECORD_KEY, &raw)?;
        tracing::debug!(record = %raw, "progress restored");
        Ok(())
    }

    /// Drop the record; the next `load` returns defaults
    pub fn reset(&self) -> StoreResult<()> {
        self.storage.remove(PROGRESS_RECORD_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StoreError};
    use crate::storage::{MemoryStorage, MockStorage};
    use nextstep_catalog::{Contribution, ProgressKey};
    use pretty_assertions::assert_eq;

    #[test]
    fn first_load_returns_defaults() {
        let store = ProgressStore::new(MemoryStorage::new());
        assert_eq!(store.load(), ProgressCounters::default());
    }

    #[test]
    fn save_then_load() {
        let store = ProgressStore::new(MemoryStorage::new());
        let mut counters = ProgressCounters::new();
        counters.credit(ProgressKey::VolunteeredHours, Contribution::Count(3));
        counters.credit(ProgressKey::IsFoundingMember, Contribution::Flag(true));

        store.save(&counters).unwrap();
        assert_eq!(store.load(), counters);
    }

    #[test]
    fn malformed_record_reads_as_defaults() {
        let storage = MemoryStorage::new();
        storage.set(PROGRESS_RECORD_KEY, "{\"eventsAttended\": ").unwrap();
        assert_eq!(ProgressStore::new(storage).load(), ProgressCounters::default());
    }

    #[test]
    fn negative_counter_reads_as_defaults() {
        let storage = MemoryStorage::new();
        storage.set(PROGRESS_RECORD_KEY, r#"{"eventsAttended": -1}"#).unwrap();
        assert_eq!(ProgressStore::new(storage).load(), ProgressCounters::default());
    }

    #[test]
    fn unavailable_storage_reads_as_defaults() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(StorageError::unavailable("disabled")));
        assert_eq!(ProgressStore::new(storage).load(), ProgressCounters::default());
    }

    #[test]
    fn save_failure_is_reported() {
        let mut storage = MockStorage::new();
        storage
            .expect_set()
            .returning(|_, _| Err(StorageError::unavailable("quota exceeded")));
        let result = ProgressStore::new(storage).save(&ProgressCounters::default());
        assert!(matches!(result, Err(StoreError::Storage(StorageError::Unavailable(_)))));
    }

    #[test]
    fn restore_writes_through_the_medium() {
        let mut storage = MockStorage::new();
        storage
            .expect_restore()
            .withf(|key, value| {
                key == PROGRESS_RECORD_KEY && value.contains("\"eventsAttended\":1")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        storage.expect_set().never();

        let mut counters = ProgressCounters::new();
        counters.set(ProgressKey::EventsAttended, 1);
        ProgressStore::new(storage).restore(&counters).unwrap();
    }

    #[test]
    fn reset_clears_record() {
        let store = ProgressStore::new(MemoryStorage::new());
        let mut counters = ProgressCounters::new();
        counters.set(ProgressKey::EventsAttended, 4);
        store.save(&counters).unwrap();

        store.reset().unwrap();
        assert_eq!(store.load(), ProgressCounters::default());
    }
}
