//! Profile figures and the recent-activity feed

use crate::evaluator;
use nextstep_catalog::{Catalog, Event, EventId, ProgressCounters};
use serde::Serialize;
use std::fmt;

/// Headline numbers for the profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub events_attended: u32,
    pub badges_earned: usize,
    pub volunteered_hours: u32,
    pub completion_percent: u8,
    pub badges_remaining: usize,
}

impl ProfileStats {
    /// Derive from counters
    #[must_use]
    pub fn compute(catalog: &Catalog, counters: &ProgressCounters) -> Self {
        let summary = evaluator::summarize(catalog.badges(), counters);
        Self {
            events_attended: counters.events_attended,
            badges_earned: summary.earned_count,
            volunteered_hours: counters.volunteered_hours,
            completion_percent: summary.completion_percent,
            badges_remaining: summary.remaining(),
        }
    }
}

/// What the user did at a completed event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivityKind {
    Attended,
    Volunteered { hours: u32 },
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attended => f.write_str("Attended"),
            Self::Volunteered { hours } => write!(f, "Volunteered • {hours} hours"),
        }
    }
}

/// One row of the activity feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityEntry<'a> {
    pub event: &'a Event,
    pub kind: ActivityKind,
}

impl<'a> ActivityEntry<'a> {
    fn new(event: &'a Event) -> Self {
        let kind = match event.volunteered_hours() {
            0 => ActivityKind::Attended,
            hours => ActivityKind::Volunteered { hours },
        };
        Self { event, kind }
    }
}

/// Completed events, most recent date first
///
/// Ids not in the catalog are skipped. Events whose date does not parse
/// sort after every dated event.
#[must_use]
pub fn recent_activity<'a>(catalog: &'a Catalog, completed: &[EventId]) -> Vec<ActivityEntry<'a>> {
    let mut entries: Vec<_> = completed
        .iter()
        .filter_map(|id| catalog.event(id.as_str()))
        .map(ActivityEntry::new)
        .collect();
    entries.sort_by(|a, b| b.event.date().cmp(&a.event.date()));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<EventId> {
        raw.iter().copied().map(EventId::from).collect()
    }

    #[test]
    fn stats_for_fresh_user() {
        let stats = ProfileStats::compute(Catalog::builtin(), &ProgressCounters::new());
        assert_eq!(stats.events_attended, 0);
        assert_eq!(stats.badges_earned, 0);
        assert_eq!(stats.badges_remaining, 20);
        assert_eq!(stats.completion_percent, 0);
    }

    #[test]
    fn stats_follow_counters() {
        let mut counters = ProgressCounters::new();
        counters.events_attended = 2;
        counters.volunteered_hours = 5;
        let stats = ProfileStats::compute(Catalog::builtin(), &counters);
        assert_eq!(stats.volunteered_hours, 5);
        assert_eq!(stats.badges_earned, 2);
        assert_eq!(stats.badges_remaining, 18);
        assert_eq!(stats.completion_percent, 10);
    }

    #[test]
    fn activity_is_newest_first() {
        let feed = recent_activity(Catalog::builtin(), &ids(&["event-1", "event-7", "event-4"]));
        let order: Vec<_> = feed.iter().map(|e| e.event.id.as_str()).collect();
        assert_eq!(order, vec!["event-7", "event-4", "event-1"]);
    }

    #[test]
    fn activity_labels() {
        let feed = recent_activity(Catalog::builtin(), &ids(&["event-4", "event-2"]));
        assert_eq!(feed[0].kind.to_string(), "Volunteered • 2 hours");
        assert_eq!(feed[1].kind.to_string(), "Attended");
    }

    #[test]
    fn unknown_and_undated_events() {
        let mut catalog_events = Catalog::builtin().events().to_vec();
        catalog_events[0].info.date = "TBD".to_string();
        let catalog = Catalog::new(Catalog::builtin().badges().to_vec(), catalog_events);

        let feed = recent_activity(&catalog, &ids(&["event-1", "event-99", "event-2"]));
        let order: Vec<_> = feed.iter().map(|e| e.event.id.as_str()).collect();
        assert_eq!(order, vec!["event-2", "event-1"]);
    }
}
