//! Testing utilities for the NextStep workspace
//!
//! Shared fixtures and a storage medium whose writes can be made to fail.

#![allow(missing_docs)]

use nextstep_catalog::{Catalog, Contribution, Event, EventCategory, ProgressCounters, ProgressKey};
use nextstep_store::{MemoryStorage, Storage, StorageError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FOUNDING_EVENT_ID: &str = "event-founding";

/// Launch event that grants the founding-member flag
pub fn create_founding_event() -> Event {
    Event::new(FOUNDING_EVENT_ID, EventCategory::Political, "NextStep Launch Night")
        .contributes(ProgressKey::EventsAttended, Contribution::Count(1))
        .contributes(ProgressKey::IsFoundingMember, Contribution::Flag(true))
}

/// Built-in catalog plus the founding event
pub fn create_test_catalog() -> Catalog {
    let builtin = Catalog::builtin();
    let mut events = builtin.events().to_vec();
    events.push(create_founding_event());
    Catalog::new(builtin.badges().to_vec(), events)
}

/// Counters with the given values, zero elsewhere
pub fn counters_with(values: &[(ProgressKey, u32)]) -> ProgressCounters {
    let mut counters = ProgressCounters::new();
    for &(key, value) in values {
        counters.set(key, value);
    }
    counters
}

/// In-memory medium that refuses writes to selected keys
#[derive(Debug, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    failing: Mutex<HashSet<String>>,
    writes: AtomicUsize,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every later `set`/`remove` on `key`
    pub fn fail_writes_to(&self, key: &str) {
        self.failing.lock().insert(key.to_string());
    }

    /// Accept writes again
    pub fn heal(&self) {
        self.failing.lock().clear();
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.failing.lock().contains(key) {
            return Err(StorageError::unavailable(format!("writes to {key} refused")));
        }
        Ok(())
    }
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Catalog document in JSON with one badge and one event
pub const SMALL_CATALOG_JSON: &str = r#"{
  "badges": [
    {
      "id": 1,
      "name": "First Step",
      "description": "Attended your first civic event",
      "category": "milestone",
      "progressKey": "eventsAttended",
      "required": 1
    }
  ],
  "events": [
    {
      "id": "event-1",
      "title": "Town Hall Meeting",
      "category": "political",
      "date": "March 2, 2026",
      "badgeProgress": { "eventsAttended": 1 }
    }
  ]
}"#;
