//! Transition Property Tests
//!
//! Arbitrary sequences of completions over the built-in catalog.

use nextstep_catalog::{Catalog, ProgressCounters};
use nextstep_store::MemoryStorage;
use nextstep_tracker::evaluator;
use nextstep_tracker::{NoOp, Tracker, Transition};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Complete(usize),
    Uncomplete(usize),
}

fn event_index() -> impl Strategy<Value = usize> {
    0..Catalog::builtin().events().len()
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        event_index().prop_map(Step::Complete),
        event_index().prop_map(Step::Uncomplete),
    ]
}

/// Counters implied by applying each completed event exactly once
fn expected_counters(completed: &[nextstep_catalog::EventId]) -> ProgressCounters {
    let mut counters = ProgressCounters::new();
    for id in completed {
        let event = Catalog::builtin().event(id.as_str()).unwrap();
        for (key, contribution) in &event.badge_progress {
            counters.credit(*key, *contribution);
        }
    }
    counters
}

proptest! {
    #[test]
    fn prop_repeated_completion_applies_once(index in event_index(), repeats in 1usize..6) {
        let storage = MemoryStorage::new();
        let tracker = Tracker::new(Catalog::builtin(), &storage, ());
        let event = &Catalog::builtin().events()[index];

        let first = tracker.complete(event.id.as_str()).unwrap();
        let first_is_completed = matches!(first, Transition::Completed { .. });
        prop_assert!(first_is_completed);
        let after_once = tracker.counters();
        for _ in 1..repeats {
            prop_assert_eq!(
                tracker.complete(event.id.as_str()).unwrap(),
                Transition::Unchanged(NoOp::AlreadyCompleted)
            );
        }
        prop_assert_eq!(tracker.counters(), after_once);
    }

    #[test]
    fn prop_uncomplete_restores_prior_counters(
        prefix in prop::collection::vec(event_index(), 0..5),
        index in event_index(),
    ) {
        let storage = MemoryStorage::new();
        let tracker = Tracker::new(Catalog::builtin(), &storage, ());
        let events = Catalog::builtin().events();
        for i in prefix {
            if i != index {
                tracker.complete(events[i].id.as_str()).unwrap();
            }
        }

        let before = tracker.counters();
        tracker.complete(events[index].id.as_str()).unwrap();
        prop_assert_eq!(
            tracker.uncomplete(events[index].id.as_str()).unwrap(),
            Transition::Uncompleted
        );
        prop_assert_eq!(tracker.counters(), before);
    }

    #[test]
    fn prop_counters_match_ledger(steps in prop::collection::vec(step(), 0..30)) {
        let storage = MemoryStorage::new();
        let tracker = Tracker::new(Catalog::builtin(), &storage, ());
        let events = Catalog::builtin().events();

        for step in steps {
            match step {
                Step::Complete(i) => { tracker.complete(events[i].id.as_str()).unwrap(); }
                Step::Uncomplete(i) => { tracker.uncomplete(events[i].id.as_str()).unwrap(); }
            }
            prop_assert_eq!(tracker.counters(), expected_counters(&tracker.completed()));
        }
    }

    #[test]
    fn prop_completion_never_unearns(steps in prop::collection::vec(event_index(), 0..10)) {
        let storage = MemoryStorage::new();
        let tracker = Tracker::new(Catalog::builtin(), &storage, ());
        let badges = Catalog::builtin().badges();

        for i in steps {
            let before = tracker.counters();
            tracker.complete(Catalog::builtin().events()[i].id.as_str()).unwrap();
            let after = tracker.counters();
            for badge in badges {
                if evaluator::is_earned(badge, &before) {
                    prop_assert!(evaluator::is_earned(badge, &after));
                }
            }
            let summary = evaluator::summarize(badges, &after);
            prop_assert!(summary.completion_percent <= 100);
            prop_assert!(summary.earned_count <= summary.total_count);
        }
    }
}
