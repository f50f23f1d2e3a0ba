//! NextStep Store
//!
//! Persistence for one user's progress record and completion ledger.
//!
//! # Layout
//!
//! | Key | Shape |
//! |---|---|
//! | `userProgress` | JSON object, 14 integer counters + `isFoundingMember` |
//! | `completedEvents` | JSON array of event-id strings |
//!
//! Both records live in the same [`Storage`] medium. Reads degrade to
//! defaults instead of failing; writes report errors so the caller can keep
//! the two records consistent.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod ledger;
pub mod progress;
pub mod storage;

pub use error::{StorageError, StoreError, StoreResult};
pub use ledger::{CompletionLedger, LEDGER_RECORD_KEY};
pub use progress::{ProgressStore, PROGRESS_RECORD_KEY};
pub use storage::{FileStorage, MemoryStorage, SessionFallback, Storage};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
