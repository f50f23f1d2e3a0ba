//! Session fallback for an unreliable medium

use super::Storage;
use crate::error::StorageError;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wraps a durable medium and overlays it with memory once it fails
///
/// The call that hits the first failure still reports it, so a caller in
/// the middle of a multi-record update can roll back. From then on writes
/// land in a session overlay and never reach the durable medium, which
/// keeps its last consistent state. Reads serve a key from the overlay if
/// it was written this session, otherwise from the durable medium.
#[derive(Debug)]
pub struct SessionFallback<S> {
    primary: S,
    /// `None` marks a key removed this session
    overlay: RwLock<IndexMap<String, Option<String>>>,
    degraded: AtomicBool,
}

impl<S: Storage> SessionFallback<S> {
    /// Wrap a durable medium
    #[must_use]
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            overlay: RwLock::new(IndexMap::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// Whether the session has fallen back to memory
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Durable medium
    #[inline]
    #[must_use]
    pub fn primary(&self) -> &S {
        &self.primary
    }

    fn degrade(&self, op: &str, key: &str, err: &StorageError) {
        if !self.degraded.swap(true, Ordering::AcqRel) {
            tracing::warn!(
                op,
                key,
                error = %err,
                "storage unavailable, keeping progress in memory for this session"
            );
        }
    }

    fn shadow(&self, key: &str, value: Option<&str>) {
        self.overlay
            .write()
            .insert(key.to_string(), value.map(str::to_string));
    }
}

impl<S: Storage> Storage for SessionFallback<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(value) = self.overlay.read().get(key) {
            return Ok(value.clone());
        }
        match self.primary.get(key) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.degrade("get", key, &err);
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.is_degraded() {
            self.shadow(key, Some(value));
            return Ok(());
        }
        self.primary.set(key, value).map_err(|err| {
            self.degrade("set", key, &err);
            err
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.is_degraded() {
            self.shadow(key, None);
            return Ok(());
        }
        self.primary.remove(key).map_err(|err| {
            self.degrade("remove", key, &err);
            err
        })
    }

    /// Write back through to the durable medium, falling back to the
    /// overlay only if that fails too
    fn restore(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.primary.set(key, value) {
            Ok(()) => {
                self.overlay.write().shift_remove(key);
                Ok(())
            }
            Err(err) => {
                self.degrade("restore", key, &err);
                self.shadow(key, Some(value));
                Err(err)
            }
        }
    }
}
