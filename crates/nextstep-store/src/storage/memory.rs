//! In-process storage

use super::Storage;
use crate::error::StorageError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Storage held in memory for the life of the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drop every key
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("userProgress").unwrap(), None);

        storage.set("userProgress", "{}").unwrap();
        assert_eq!(storage.get("userProgress").unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.len(), 1);

        storage.remove("userProgress").unwrap();
        storage.remove("userProgress").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn set_replaces_whole_value() {
        let storage = MemoryStorage::new();
        storage.set("completedEvents", r#"["event-1"]"#).unwrap();
        storage.set("completedEvents", "[]").unwrap();
        assert_eq!(storage.get("completedEvents").unwrap().as_deref(), Some("[]"));
    }
}
