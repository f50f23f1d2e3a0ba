//! Progress Mutator
//!
//! Each event is either uncompleted or completed for the current user.
//! [`Tracker::complete`] and [`Tracker::uncomplete`] are the only
//! transitions; both are guarded by the completion ledger so that an
//! event's contribution is applied at most once.
//!
//! Write order is counters first, then ledger. When the ledger write fails
//! the previous counters are written back, so the two records never
//! disagree about whether an event was applied.

use crate::error::{TrackerError, TrackerResult};
use crate::evaluator::{self, BadgeFilter, BadgeView, Summary};
use crate::notifier::Notifier;
use crate::profile::{self, ActivityEntry, ProfileStats};
use nextstep_catalog::{Badge, Catalog, Event, EventId, ProgressCounters, ProgressKey};
use nextstep_store::{CompletionLedger, ProgressStore, Storage};
use parking_lot::Mutex;

/// Why a transition did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    /// `complete` on an event already in the ledger
    AlreadyCompleted,
    /// `uncomplete` on an event not in the ledger
    NotCompleted,
    /// Event id is not in the catalog
    UnknownEvent,
}

/// Outcome of a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Contribution applied; badges that flipped to earned, ascending id
    Completed { newly_earned: Vec<Badge> },
    /// Contribution reversed
    Uncompleted,
    /// Nothing written
    Unchanged(NoOp),
}

impl Transition {
    /// Whether any record was written
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    /// Badges earned by this transition
    #[must_use]
    pub fn newly_earned(&self) -> &[Badge] {
        match self {
            Self::Completed { newly_earned } => newly_earned.as_slice(),
            _ => &[],
        }
    }
}

/// Tracks one user's progress against a catalog
///
/// Owns the progress store and completion ledger over a shared medium `S`
/// (typically `Arc<_>` or a reference) and the notifier for earned badges.
/// Mutations are serialized within the process.
pub struct Tracker<'c, S, N = ()> {
    catalog: &'c Catalog,
    progress: ProgressStore<S>,
    ledger: CompletionLedger<S>,
    notifier: N,
    transition: Mutex<()>,
}

impl<'c, S, N> Tracker<'c, S, N>
where
    S: Storage + Clone,
    N: Notifier,
{
    /// Create tracker over `storage`
    pub fn new(catalog: &'c Catalog, storage: S, notifier: N) -> Self {
        Self {
            catalog,
            progress: ProgressStore::new(storage.clone()),
            ledger: CompletionLedger::new(storage),
            notifier,
            transition: Mutex::new(()),
        }
    }
}

impl<'c, S, N> Tracker<'c, S, N>
where
    S: Storage,
    N: Notifier,
{
    /// Catalog being tracked
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Badge notifier
    #[inline]
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Progress store
    #[inline]
    #[must_use]
    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    /// Completion ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &CompletionLedger<S> {
        &self.ledger
    }

    /// Current counters
    #[must_use]
    pub fn counters(&self) -> ProgressCounters {
        self.progress.load()
    }

    /// Completed event ids, in completion order
    #[must_use]
    pub fn completed(&self) -> Vec<EventId> {
        self.ledger.completed()
    }

    /// Whether `event_id` has been completed
    #[must_use]
    pub fn is_completed(&self, event_id: &str) -> bool {
        self.ledger.is_completed(event_id)
    }

    /// Apply an event's contribution once
    pub fn complete(&self, event_id: &str) -> TrackerResult<Transition> {
        let _guard = self.transition.lock();

        let Some(event) = self.lookup(event_id) else {
            return Ok(Transition::Unchanged(NoOp::UnknownEvent));
        };
        if self.ledger.is_completed(event_id) {
            tracing::debug!(event = event_id, "event already completed");
            return Ok(Transition::Unchanged(NoOp::AlreadyCompleted));
        }

        let before = self.progress.load();
        let mut after = before;
        let mut touched: Vec<ProgressKey> = Vec::new();
        for (key, contribution) in &event.badge_progress {
            if after.credit(*key, *contribution) {
                touched.push(*key);
            }
        }

        self.progress.save(&after)?;
        match self.ledger.mark_completed(event_id) {
            Ok(true) => {}
            Ok(false) => {
                self.undo(&before);
                return Ok(Transition::Unchanged(NoOp::AlreadyCompleted));
            }
            Err(err) => {
                self.restore(&before);
                return Err(TrackerError::Storage(err));
            }
        }

        let newly_earned =
            evaluator::newly_earned(self.catalog.badges(), &touched, &before, &after);
        tracing::debug!(
            event = event_id,
            touched = touched.len(),
            earned = newly_earned.len(),
            "event completed"
        );
        if !newly_earned.is_empty() {
            self.notifier.notify(&newly_earned);
        }
        Ok(Transition::Completed { newly_earned })
    }

    /// Reverse an event's contribution once
    ///
    /// Counters are clamped at zero and flags reset to false. No
    /// notifications are sent.
    pub fn uncomplete(&self, event_id: &str) -> TrackerResult<Transition> {
        let _guard = self.transition.lock();

        let Some(event) = self.lookup(event_id) else {
            return Ok(Transition::Unchanged(NoOp::UnknownEvent));
        };
        if !self.ledger.is_completed(event_id) {
            tracing::debug!(event = event_id, "event not completed");
            return Ok(Transition::Unchanged(NoOp::NotCompleted));
        }

        let before = self.progress.load();
        let mut after = before;
        for (key, contribution) in &event.badge_progress {
            after.debit(*key, *contribution);
        }

        self.progress.save(&after)?;
        match self.ledger.mark_uncompleted(event_id) {
            Ok(true) => {}
            Ok(false) => {
                self.undo(&before);
                return Ok(Transition::Unchanged(NoOp::NotCompleted));
            }
            Err(err) => {
                self.restore(&before);
                return Err(TrackerError::Storage(err));
            }
        }

        tracing::debug!(event = event_id, "event uncompleted");
        Ok(Transition::Uncompleted)
    }

    /// Clear progress and ledger
    pub fn reset(&self) -> TrackerResult<()> {
        let _guard = self.transition.lock();
        self.progress.reset()?;
        self.ledger.reset()?;
        tracing::info!("progress reset");
        Ok(())
    }

    /// Earned totals over the catalog
    #[must_use]
    pub fn summary(&self) -> Summary {
        evaluator::summarize(self.catalog.badges(), &self.counters())
    }

    /// Badge grid rows
    #[must_use]
    pub fn badge_views(&self, selection: BadgeFilter) -> Vec<BadgeView<'c>> {
        evaluator::badge_views(self.catalog.badges(), &self.counters(), selection)
    }

    /// Profile figures
    #[must_use]
    pub fn profile(&self) -> ProfileStats {
        ProfileStats::compute(self.catalog, &self.counters())
    }

    /// Completed events, most recent first
    #[must_use]
    pub fn recent_activity(&self) -> Vec<ActivityEntry<'c>> {
        profile::recent_activity(self.catalog, &self.completed())
    }

    fn lookup(&self, event_id: &str) -> Option<&'c Event> {
        let event = self.catalog.event(event_id);
        if event.is_none() {
            tracing::warn!(event = event_id, "unknown event id, ignoring");
        }
        event
    }

    /// Another writer got to the ledger first
    fn undo(&self, before: &ProgressCounters) {
        if let Err(error) = self.progress.save(before) {
            tracing::error!(%error, "failed to undo progress after concurrent ledger change");
        }
    }

    /// The ledger write failed; the counters must go back to the durable
    /// medium, not just the session
    fn restore(&self, before: &ProgressCounters) {
        if let Err(error) = self.progress.restore(before) {
            tracing::error!(%error, "failed to restore progress after ledger write failure");
        }
    }
}

impl<S, N> std::fmt::Debug for Tracker<'_, S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("badges", &self.catalog.badges().len())
            .field("events", &self.catalog.events().len())
            .finish_non_exhaustive()
    }
}
