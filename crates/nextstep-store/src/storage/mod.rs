//! Storage media
//!
//! A [`Storage`] is a flat string-to-string map scoped to one user profile,
//! the same shape as browser local storage. Each `set` replaces the whole
//! value for a key, so a record is either fully written or not at all.

mod fallback;
mod file;
mod memory;

pub use fallback::SessionFallback;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;
use std::sync::Arc;

/// Per-user key/value medium
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key succeeds
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Write back a value that a failed multi-record update overwrote
    ///
    /// Media that stop writing through after a failure must still send
    /// this to the durable medium.
    fn restore(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn restore(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).restore(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn restore(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).restore(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn restore(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).restore(key, value)
    }
}
