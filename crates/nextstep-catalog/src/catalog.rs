//! Read-only catalog of badges and events
//!
//! A [`Catalog`] is immutable once built. Badges are kept in ascending id
//! order, events in declaration order.
//!
//! Catalog documents (JSON or YAML) are validated entry by entry: an entry
//! that references a counter outside the progress schema, reuses an id, or
//! has a zero threshold is dropped with a warning and reported as a
//! [`CatalogIssue`], while the remaining entries load.

use crate::badge::{Badge, BadgeCategory, BadgeId};
use crate::error::{CatalogError, CatalogIssue};
use crate::event::{Event, EventCategory, EventId, EventInfo};
use crate::schema::{Contribution, ProgressKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Badge as written in a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: BadgeCategory,
    pub progress_key: String,
    pub required: u32,
}

/// Event as written in a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: EventId,
    pub category: EventCategory,
    #[serde(flatten)]
    pub info: EventInfo,
    #[serde(default)]
    pub badge_progress: IndexMap<String, Contribution>,
}

/// Unvalidated catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub badges: Vec<BadgeRecord>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// Result of validating a document
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    /// Entries that passed validation
    pub catalog: Catalog,
    /// Entries that were dropped
    pub issues: Vec<CatalogIssue>,
}

/// Immutable badge and event definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    badges: Vec<Badge>,
    events: Vec<Event>,
}

impl Catalog {
    /// Catalog with no entries
    ///
    /// Stands in for a catalog that has not been loaded yet.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from already-typed definitions
    ///
    /// Later duplicates and zero-threshold badges are dropped.
    #[must_use]
    pub fn new(badges: Vec<Badge>, events: Vec<Event>) -> Self {
        let mut issues = Vec::new();
        let catalog = Self::assemble(badges, events, &mut issues);
        log_issues(&issues);
        catalog
    }

    /// Validate a parsed document
    #[must_use]
    pub fn from_document(document: CatalogDocument) -> CatalogLoad {
        let mut issues = Vec::new();

        let badges = document
            .badges
            .into_iter()
            .filter_map(|record| match record.progress_key.parse::<ProgressKey>() {
                Ok(progress_key) => Some(Badge {
                    id: record.id,
                    name: record.name,
                    description: record.description,
                    icon: record.icon,
                    category: record.category,
                    progress_key,
                    required: record.required,
                }),
                Err(_) => {
                    issues.push(CatalogIssue::UnknownBadgeKey {
                        badge: record.id,
                        key: record.progress_key,
                    });
                    None
                }
            })
            .collect();

        let events = document
            .events
            .into_iter()
            .map(|record| {
                let mut badge_progress = IndexMap::with_capacity(record.badge_progress.len());
                for (key, contribution) in record.badge_progress {
                    match key.parse::<ProgressKey>() {
                        Ok(key) => {
                            badge_progress.insert(key, contribution);
                        }
                        Err(_) => issues.push(CatalogIssue::UnknownEventKey {
                            event: record.id.clone(),
                            key,
                        }),
                    }
                }
                Event {
                    id: record.id,
                    category: record.category,
                    info: record.info,
                    badge_progress,
                }
            })
            .collect();

        let catalog = Self::assemble(badges, events, &mut issues);
        log_issues(&issues);
        CatalogLoad { catalog, issues }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> Result<CatalogLoad, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        Ok(Self::from_document(document))
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<CatalogLoad, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(content)?;
        Ok(Self::from_document(document))
    }

    /// Read a `.json`, `.yaml` or `.yml` catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<CatalogLoad, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;

        let load = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            badges = load.catalog.badges.len(),
            events = load.catalog.events.len(),
            issues = load.issues.len(),
            "catalog loaded"
        );
        Ok(load)
    }

    fn assemble(
        mut badges: Vec<Badge>,
        events: Vec<Event>,
        issues: &mut Vec<CatalogIssue>,
    ) -> Self {
        let mut seen_badges = HashSet::new();
        badges.retain(|badge| {
            if badge.required == 0 {
                issues.push(CatalogIssue::ZeroThreshold(badge.id));
                return false;
            }
            if !seen_badges.insert(badge.id) {
                issues.push(CatalogIssue::DuplicateBadge(badge.id));
                return false;
            }
            true
        });
        badges.sort_by_key(|badge| badge.id);

        let mut seen_events = HashSet::new();
        let events = events
            .into_iter()
            .filter(|event| {
                if seen_events.insert(event.id.clone()) {
                    true
                } else {
                    issues.push(CatalogIssue::DuplicateEvent(event.id.clone()));
                    false
                }
            })
            .collect();

        Self { badges, events }
    }

    /// Badges in ascending id order
    #[inline]
    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Events in catalog order
    #[inline]
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Whether the catalog has no entries at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.badges.is_empty() && self.events.is_empty()
    }

    /// Find a badge by id
    #[must_use]
    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.badges
            .binary_search_by_key(&id, |badge| badge.id)
            .ok()
            .map(|idx| &self.badges[idx])
    }

    /// Find an event by id
    #[must_use]
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id.as_str() == id)
    }

    /// Badges tracking a given counter, ascending id
    pub fn badges_tracking(&self, key: ProgressKey) -> impl Iterator<Item = &Badge> + '_ {
        self.badges.iter().filter(move |badge| badge.progress_key == key)
    }

    /// Events in a category; `None` means every event
    pub fn events_in(&self, category: Option<EventCategory>) -> impl Iterator<Item = &Event> + '_ {
        self.events
            .iter()
            .filter(move |event| category.map_or(true, |c| event.category == c))
    }
}

fn log_issues(issues: &[CatalogIssue]) {
    for issue in issues {
        tracing::warn!(%issue, "catalog entry skipped");
    }
}
