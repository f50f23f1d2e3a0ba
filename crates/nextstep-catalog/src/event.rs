//! Civic event catalog entries

use crate::schema::{Contribution, ProgressKey};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Date format used by the catalog ("March 14, 2026")
pub const EVENT_DATE_FORMAT: &str = "%B %d, %Y";

/// Event identifier ("event-4")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Create from string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Event grouping used by the events page and map layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Political,
    Youth,
    Innovation,
    Environmental,
    Education,
}

impl EventCategory {
    /// Every category
    pub const ALL: [EventCategory; 5] = [
        Self::Political,
        Self::Youth,
        Self::Innovation,
        Self::Environmental,
        Self::Education,
    ];

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Political => "political",
            Self::Youth => "youth",
            Self::Innovation => "innovation",
            Self::Environmental => "environmental",
            Self::Education => "education",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: '{0}'")]
pub struct UnknownEventCategory(pub String);

impl FromStr for EventCategory {
    type Err = UnknownEventCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownEventCategory(s.to_string()))
    }
}

/// Presentation data for an event
///
/// Carried for display only; none of it affects progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInfo {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub full_description: String,
    pub organizer: String,
    pub contact: String,
    pub phone: String,
    pub capacity: u32,
    pub registered: u32,
    pub tags: Vec<String>,
    pub requirements: String,
    pub accessibility: String,
    pub parking: String,
}

/// A civic event and what completing it contributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub category: EventCategory,
    #[serde(flatten)]
    pub info: EventInfo,
    /// Declared contribution per progress key, in declaration order
    #[serde(default)]
    pub badge_progress: IndexMap<ProgressKey, Contribution>,
}

impl Event {
    /// Create event with only a title
    #[must_use]
    pub fn new(id: impl Into<String>, category: EventCategory, title: impl Into<String>) -> Self {
        Self {
            id: EventId::new(id),
            category,
            info: EventInfo {
                title: title.into(),
                ..EventInfo::default()
            },
            badge_progress: IndexMap::new(),
        }
    }

    /// With presentation data
    #[inline]
    #[must_use]
    pub fn with_info(mut self, info: EventInfo) -> Self {
        self.info = info;
        self
    }

    /// With one more contribution
    #[inline]
    #[must_use]
    pub fn contributes(mut self, key: ProgressKey, contribution: Contribution) -> Self {
        self.badge_progress.insert(key, contribution);
        self
    }

    /// Keys this event actually moves (zero deltas excluded)
    pub fn touched_keys(&self) -> impl Iterator<Item = ProgressKey> + '_ {
        self.badge_progress
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(key, _)| *key)
    }

    /// Volunteer hours credited by this event
    #[must_use]
    pub fn volunteered_hours(&self) -> u32 {
        self.badge_progress
            .get(&ProgressKey::VolunteeredHours)
            .map_or(0, |c| c.amount())
    }

    /// Parsed event date, if the catalog string is well-formed
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.info.date.trim(), EVENT_DATE_FORMAT).ok()
    }

    /// Share of capacity already registered, rounded, 0 when capacity is unknown
    #[must_use]
    pub fn capacity_percent(&self) -> u32 {
        if self.info.capacity == 0 {
            return 0;
        }
        let ratio = f64::from(self.info.registered) / f64::from(self.info.capacity);
        (ratio * 100.0).round() as u32
    }

    /// Remaining registration spots
    #[inline]
    #[must_use]
    pub fn spots_left(&self) -> u32 {
        self.info.capacity.saturating_sub(self.info.registered)
    }
}
