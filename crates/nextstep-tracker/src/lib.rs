//! NextStep Tracker
//!
//! Turns civic-event completions into progress and badges:
//! - Applies an event's contribution at most once (guarded by the ledger)
//! - Reverses it on request, clamping counters at zero
//! - Detects badges that flip from locked to earned and notifies once
//! - Derives badge grids, profile figures and the activity feed
//!
//! # Example
//!
//! ```rust
//! use nextstep_catalog::Catalog;
//! use nextstep_store::MemoryStorage;
//! use nextstep_tracker::{ToastBoard, Tracker, Transition};
//!
//! let storage = MemoryStorage::new();
//! let tracker = Tracker::new(Catalog::builtin(), &storage, ToastBoard::new());
//!
//! let transition = tracker.complete("event-1").unwrap();
//! assert_eq!(transition.newly_earned()[0].name, "First Step");
//! assert!(tracker.complete("event-1").unwrap().newly_earned().is_empty());
//! assert!(matches!(tracker.uncomplete("event-1").unwrap(), Transition::Uncompleted));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod evaluator;
pub mod mutator;
pub mod notifier;
pub mod profile;

// Re-exports for convenience
pub use config::{LogConfig, NotificationConfig, StorageBackend, StorageConfig, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use evaluator::{BadgeFilter, BadgeView, Summary, UnknownBadgeFilter};
pub use mutator::{NoOp, Tracker, Transition};
pub use notifier::{
    Acknowledgement, LogNotifier, Notifier, NotifyFn, ToastBoard, DEFAULT_TOAST_LIFETIME,
    TOAST_TITLE,
};
pub use profile::{recent_activity, ActivityEntry, ActivityKind, ProfileStats};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the tracker
    pub use crate::evaluator::{is_earned, percent, progress_of, summarize};
    pub use crate::{
        BadgeFilter, LogNotifier, Notifier, ProfileStats, ToastBoard, Tracker, TrackerConfig,
        TrackerError, Transition,
    };
    pub use nextstep_catalog::{Badge, Catalog, Event, ProgressCounters, ProgressKey};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
