//! NextStep Catalog
//!
//! Read-only reference data for progress tracking.
//!
//! # Core Concepts
//!
//! - [`ProgressKey`]: the closed set of counters in a user's progress record
//! - [`ProgressCounters`]: one user's record (14 counters + founding flag)
//! - [`Badge`]: an achievement unlocked when one counter reaches a threshold
//! - [`Event`]: a civic event and the [`Contribution`]s completing it makes
//! - [`Catalog`]: immutable badge and event lists, shipped or loaded from file
//!
//! # Example
//!
//! ```rust
//! use nextstep_catalog::{Catalog, ProgressKey};
//!
//! let catalog = Catalog::builtin();
//! let cleanup = catalog.event("event-4").unwrap();
//! assert!(cleanup.badge_progress.contains_key(&ProgressKey::VolunteeredHours));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod badge;
mod builtin;
mod catalog;
mod error;
mod event;
mod schema;

pub use badge::{Badge, BadgeCategory, BadgeId, UnknownBadgeCategory};
pub use catalog::{BadgeRecord, Catalog, CatalogDocument, CatalogLoad, EventRecord};
pub use error::{CatalogError, CatalogIssue};
pub use event::{Event, EventCategory, EventId, EventInfo, UnknownEventCategory, EVENT_DATE_FORMAT};
pub use schema::{Contribution, ProgressCounters, ProgressKey, UnknownProgressKey};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
