//! Badge definitions

use crate::schema::ProgressKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Badge identifier
///
/// Small integers; catalog order and notification order follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(pub u32);

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Badge grouping used by the badge grid filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    /// One-off milestones
    Milestone,
    /// Attendance and participation
    Participation,
    /// Speaking, organizing, inviting
    Leadership,
    /// Volunteering and environmental work
    Impact,
}

impl BadgeCategory {
    /// Every category
    pub const ALL: [BadgeCategory; 4] = [
        Self::Milestone,
        Self::Participation,
        Self::Leadership,
        Self::Impact,
    ];

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Participation => "participation",
            Self::Leadership => "leadership",
            Self::Impact => "impact",
        }
    }
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown badge category: '{0}'")]
pub struct UnknownBadgeCategory(pub String);

impl FromStr for BadgeCategory {
    type Err = UnknownBadgeCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownBadgeCategory(s.to_string()))
    }
}

/// An achievement unlocked when one counter reaches a threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    /// Icon image URL
    #[serde(default)]
    pub icon: String,
    pub category: BadgeCategory,
    /// Counter this badge tracks
    pub progress_key: ProgressKey,
    /// Threshold, always > 0
    pub required: u32,
}

impl Badge {
    /// Create badge without an icon
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        category: BadgeCategory,
        progress_key: ProgressKey,
        required: u32,
    ) -> Self {
        Self {
            id: BadgeId(id),
            name: name.into(),
            description: description.into(),
            icon: String::new(),
            category,
            progress_key,
            required,
        }
    }

    /// With icon URL
    #[inline]
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}
