//! Completion Scenario Tests
//!
//! End-to-end walks through the tracker over in-memory storage.

use nextstep_catalog::{Catalog, ProgressCounters, ProgressKey};
use nextstep_store::{MemoryStorage, Storage, LEDGER_RECORD_KEY, PROGRESS_RECORD_KEY};
use nextstep_test_utils::{create_test_catalog, FOUNDING_EVENT_ID};
use nextstep_tracker::evaluator::{self, BadgeFilter};
use nextstep_tracker::{NoOp, NotifyFn, ToastBoard, Tracker, Transition};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

#[test]
fn test_first_event_earns_first_step_once() {
    let storage = MemoryStorage::new();
    let seen = Mutex::new(Vec::new());
    let tracker = Tracker::new(
        Catalog::builtin(),
        &storage,
        NotifyFn(|badge: &nextstep_catalog::Badge| seen.lock().push(badge.name.clone())),
    );

    tracker.complete("event-1").unwrap();
    tracker.complete("event-1").unwrap();

    assert_eq!(*seen.lock(), vec!["First Step".to_string()]);
    let first_step = Catalog::builtin().badges().first().unwrap();
    assert!(evaluator::is_earned(first_step, &tracker.counters()));
}

#[test]
fn test_repeat_completion_credits_once() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ());

    tracker.complete("event-4").unwrap();
    let second = tracker.complete("event-4").unwrap();
    assert_eq!(second, Transition::Unchanged(NoOp::AlreadyCompleted));

    let mut expected = ProgressCounters::new();
    expected.events_attended = 1;
    expected.environmental_events = 1;
    expected.volunteered_hours = 2;
    assert_eq!(tracker.counters(), expected);
}

#[test]
fn test_complete_then_uncomplete_restores_zero() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ());

    tracker.complete("event-4").unwrap();
    tracker.uncomplete("event-4").unwrap();

    assert_eq!(tracker.counters(), ProgressCounters::default());
    assert!(!tracker.is_completed("event-4"));
    assert_eq!(
        storage.get(LEDGER_RECORD_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_founding_member_flag_round_trip() {
    let catalog = create_test_catalog();
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(&catalog, &storage, ToastBoard::new());
    let founding = catalog
        .badges_tracking(ProgressKey::IsFoundingMember)
        .next()
        .unwrap();

    assert_eq!(evaluator::progress_of(founding, &tracker.counters()), 0);

    let transition = tracker.complete(FOUNDING_EVENT_ID).unwrap();
    assert_eq!(evaluator::progress_of(founding, &tracker.counters()), 1);
    assert!(transition.newly_earned().iter().any(|b| b.id == founding.id));

    tracker.uncomplete(FOUNDING_EVENT_ID).unwrap();
    assert_eq!(evaluator::progress_of(founding, &tracker.counters()), 0);
    assert!(!evaluator::is_earned(founding, &tracker.counters()));
}

#[test]
fn test_locked_and_earned_partition_catalog() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ());
    for id in ["event-1", "event-4", "event-7"] {
        tracker.complete(id).unwrap();
    }

    let counters = tracker.counters();
    let badges = Catalog::builtin().badges();
    let earned = evaluator::filter(badges, &counters, BadgeFilter::Earned);
    let locked = evaluator::filter(badges, &counters, BadgeFilter::Locked);

    assert_eq!(earned.len() + locked.len(), badges.len());
    assert!(earned.iter().all(|b| !locked.contains(b)));
    let earned_ids: Vec<_> = earned.iter().map(|b| b.id.0).collect();
    assert_eq!(earned_ids, vec![1, 5]);
}

#[test]
fn test_notifications_are_not_revoked() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ToastBoard::new());

    tracker.complete("event-1").unwrap();
    tracker.uncomplete("event-1").unwrap();
    assert_eq!(tracker.notifier().len(), 1);

    // Earning it again notifies again.
    tracker.complete("event-1").unwrap();
    assert_eq!(tracker.notifier().len(), 2);
}

#[test]
fn test_records_use_site_keys() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ());
    tracker.complete("event-2").unwrap();

    let raw = storage.get(PROGRESS_RECORD_KEY).unwrap().unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(record["eventsAttended"], 1);
    assert_eq!(record["youthEvents"], 1);
    assert_eq!(record["isFoundingMember"], false);
    assert_eq!(
        storage.get(LEDGER_RECORD_KEY).unwrap().as_deref(),
        Some(r#"["event-2"]"#)
    );
}

#[test]
fn test_profile_and_activity_after_completions() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ());
    for id in ["event-4", "event-2", "event-7"] {
        tracker.complete(id).unwrap();
    }

    let stats = tracker.profile();
    assert_eq!(stats.events_attended, 3);
    assert_eq!(stats.volunteered_hours, 5);
    assert_eq!(stats.badges_earned, 2);

    let feed: Vec<_> = tracker
        .recent_activity()
        .iter()
        .map(|entry| (entry.event.id.to_string(), entry.kind.to_string()))
        .collect();
    assert_eq!(
        feed,
        vec![
            ("event-7".to_string(), "Volunteered • 3 hours".to_string()),
            ("event-4".to_string(), "Volunteered • 2 hours".to_string()),
            ("event-2".to_string(), "Attended".to_string()),
        ]
    );
}

#[test]
fn test_badge_grid_rows() {
    let storage = MemoryStorage::new();
    let tracker = Tracker::new(Catalog::builtin(), &storage, ());
    tracker.complete("event-4").unwrap();

    let impact =
        tracker.badge_views(BadgeFilter::Category(nextstep_catalog::BadgeCategory::Impact));
    let labels: Vec<_> = impact.iter().map(|v| (v.badge.id.0, v.progress_label())).collect();
    assert_eq!(
        labels,
        vec![
            (6, "2 / 10".to_string()),
            (7, "2 / 50".to_string()),
            (9, "1 / 3".to_string()),
            (18, "0 / 5".to_string()),
            (20, "0 / 10".to_string()),
        ]
    );
}
