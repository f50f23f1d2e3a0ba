//! Achievement Evaluator
//!
//! Pure functions from a progress record and badge definitions to earned
//! status, completion percentages and filtered badge lists. Nothing here
//! reads or writes storage.

use nextstep_catalog::{Badge, BadgeCategory, ProgressCounters, ProgressKey};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Current value of the counter a badge tracks (flag reads as 0 or 1)
#[inline]
#[must_use]
pub fn progress_of(badge: &Badge, counters: &ProgressCounters) -> u32 {
    counters.get(badge.progress_key)
}

/// Whether the tracked counter has reached the badge threshold
#[inline]
#[must_use]
pub fn is_earned(badge: &Badge, counters: &ProgressCounters) -> bool {
    progress_of(badge, counters) >= badge.required
}

/// Progress toward the threshold, rounded and capped at 100
#[must_use]
pub fn percent(badge: &Badge, counters: &ProgressCounters) -> u8 {
    if badge.required == 0 {
        return 100;
    }
    ratio_percent(progress_of(badge, counters) as usize, badge.required as usize)
}

/// Aggregate earned status over a badge list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub earned_count: usize,
    pub total_count: usize,
    /// `round(100 * earned / total)`, 0 for an empty list
    pub completion_percent: u8,
}

impl Summary {
    /// Badges still locked
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total_count - self.earned_count
    }
}

/// Count earned badges
#[must_use]
pub fn summarize(badges: &[Badge], counters: &ProgressCounters) -> Summary {
    let earned_count = badges.iter().filter(|b| is_earned(b, counters)).count();
    let total_count = badges.len();
    let completion_percent = if total_count == 0 {
        0
    } else {
        ratio_percent(earned_count, total_count)
    };
    Summary {
        earned_count,
        total_count,
        completion_percent,
    }
}

fn ratio_percent(part: usize, whole: usize) -> u8 {
    let pct = (part as f64 / whole as f64 * 100.0).round();
    pct.min(100.0) as u8
}

/// Badge grid selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeFilter {
    /// Every badge
    #[default]
    All,
    /// Earned badges only
    Earned,
    /// Badges not yet earned
    Locked,
    /// Badges in one category
    Category(BadgeCategory),
}

impl BadgeFilter {
    /// Whether a badge passes this filter
    #[must_use]
    pub fn matches(&self, badge: &Badge, counters: &ProgressCounters) -> bool {
        match self {
            Self::All => true,
            Self::Earned => is_earned(badge, counters),
            Self::Locked => !is_earned(badge, counters),
            Self::Category(category) => badge.category == *category,
        }
    }
}

impl fmt::Display for BadgeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Earned => f.write_str("earned"),
            Self::Locked => f.write_str("locked"),
            Self::Category(category) => write!(f, "{category}"),
        }
    }
}

/// Filter name that is neither a mode nor a category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown badge filter: '{0}' (expected all, earned, locked or a category)")]
pub struct UnknownBadgeFilter(pub String);

impl FromStr for BadgeFilter {
    type Err = UnknownBadgeFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "earned" => Ok(Self::Earned),
            "locked" => Ok(Self::Locked),
            other => other
                .parse::<BadgeCategory>()
                .map(Self::Category)
                .map_err(|_| UnknownBadgeFilter(s.to_string())),
        }
    }
}

/// Badges passing `filter`, in input order
#[must_use]
pub fn filter<'a>(
    badges: &'a [Badge],
    counters: &ProgressCounters,
    selection: BadgeFilter,
) -> Vec<&'a Badge> {
    badges
        .iter()
        .filter(|badge| selection.matches(badge, counters))
        .collect()
}

/// One row of the badge grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeView<'a> {
    pub badge: &'a Badge,
    pub progress: u32,
    pub percent: u8,
    pub earned: bool,
}

impl BadgeView<'_> {
    /// "progress / required"
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.progress, self.badge.required)
    }
}

/// Display rows for the badges passing `filter`
#[must_use]
pub fn badge_views<'a>(
    badges: &'a [Badge],
    counters: &ProgressCounters,
    selection: BadgeFilter,
) -> Vec<BadgeView<'a>> {
    filter(badges, counters, selection)
        .into_iter()
        .map(|badge| BadgeView {
            badge,
            progress: progress_of(badge, counters),
            percent: percent(badge, counters),
            earned: is_earned(badge, counters),
        })
        .collect()
}

/// Badges tracking one of `touched` that were locked in `before` and are
/// earned in `after`, in input order
#[must_use]
pub fn newly_earned(
    badges: &[Badge],
    touched: &[ProgressKey],
    before: &ProgressCounters,
    after: &ProgressCounters,
) -> Vec<Badge> {
    badges
        .iter()
        .filter(|badge| touched.contains(&badge.progress_key))
        .filter(|badge| !is_earned(badge, before) && is_earned(badge, after))
        .cloned()
        .collect()
}
