//! Completion Ledger
//!
//! The set of event ids whose contribution has been applied. It lives in
//! the same medium as the progress record under its own key, stored as a
//! JSON array of id strings in completion order.

use crate::error::StoreResult;
use crate::storage::Storage;
use indexmap::IndexSet;
use nextstep_catalog::EventId;

/// Storage key of the ledger record
pub const LEDGER_RECORD_KEY: &str = "completedEvents";

/// Read/write access to the completed-events record
///
/// Every call reads the stored record afresh; nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub struct CompletionLedger<S> {
    storage: S,
}

impl<S: Storage> CompletionLedger<S> {
    /// Create ledger over a medium
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

    /// Completed ids in completion order; empty when nothing usable is stored
    #[must_use]
    pub fn completed(&self) -> Vec<EventId> {
        self.load().into_iter().collect()
    }

    /// Whether `event_id` is in the ledger
    #[must_use]
    pub fn is_completed(&self, event_id: &str) -> bool {
        self.load().iter().any(|id| id.as_str() == event_id)
    }

    /// Add `event_id`
    ///
    /// Returns `Ok(false)` without writing when it is already present.
    pub fn mark_completed(&self, event_id: &str) -> StoreResult<bool> {
        let mut ids = self.load();
        if !ids.insert(EventId::new(event_id)) {
            return Ok(false);
        }
        self.save(&ids)?;
        Ok(true)
    }

    /// Remove `event_id`
    ///
    /// Returns `Ok(false)` without writing when it is absent.
    pub fn mark_uncompleted(&self, event_id: &str) -> StoreResult<bool> {
        let mut ids = self.load();
        if !ids.shift_remove(event_id) {
            return Ok(false);
        }
        self.save(&ids)?;
        Ok(true)
    }

    /// Drop the record
    pub fn reset(&self) -> StoreResult<()> {
        self.storage.remove(LEDGER_RECORD_KEY)?;
        Ok(())
    }

    fn load(&self) -> IndexSet<EventId> {
        let raw = match self.storage.get(LEDGER_RECORD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return IndexSet::new(),
            Err(error) => {
                tracing::warn!(%error, "completion ledger unreadable, treating as empty");
                return IndexSet::new();
            }
        };

        match serde_json::from_str::<Vec<EventId>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(error) => {
                tracing::warn!(%error, "completion ledger malformed, treating as empty");
                IndexSet::new()
            }
        }
    }

    fn save(&self, ids: &IndexSet<EventId>) -> StoreResult<()> {
        let raw = serde_json::to_string(&ids.iter().collect::<Vec<_>>())?;
        self.storage.set(LEDGER_RECORD_KEY, &raw)?;
        Ok(())
    }
}
