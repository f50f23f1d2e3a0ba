//! Badge-earned notifications
//!
//! The mutator hands every newly earned badge to a [`Notifier`] once, in
//! ascending badge id order. [`ToastBoard`] keeps each acknowledgement
//! visible for a fixed lifetime; [`LogNotifier`] writes it to the log.

use nextstep_catalog::Badge;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long an acknowledgement stays visible
pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Headline shown on every acknowledgement
pub const TOAST_TITLE: &str = "Badge Earned!";

/// Receiver of newly earned badges
///
/// Called after both records are written, never for a badge that was
/// already earned, never on uncomplete.
pub trait Notifier {
    /// Acknowledge `badges` (ascending id order, possibly empty)
    fn notify(&self, badges: &[Badge]);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, badges: &[Badge]) {
        (**self).notify(badges);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, badges: &[Badge]) {
        (**self).notify(badges);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, badges: &[Badge]) {
        (**self).notify(badges);
    }
}

/// Discards everything
impl Notifier for () {
    fn notify(&self, _badges: &[Badge]) {}
}

/// Fan out to two receivers
impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    fn notify(&self, badges: &[Badge]) {
        self.0.notify(badges);
        self.1.notify(badges);
    }
}

/// Adapts a closure into a [`Notifier`], called once per badge
#[derive(Debug, Clone, Copy)]
pub struct NotifyFn<F>(pub F);

impl<F: Fn(&Badge)> Notifier for NotifyFn<F> {
    fn notify(&self, badges: &[Badge]) {
        badges.iter().for_each(&self.0);
    }
}

/// Writes one `info` line per earned badge
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, badges: &[Badge]) {
        for badge in badges {
            tracing::info!(
                badge = %badge.id,
                name = %badge.name,
                category = %badge.category,
                "badge earned"
            );
        }
    }
}

/// One visible badge acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub badge: Badge,
    pub raised_at: Instant,
    pub expires_at: Instant,
}

impl Acknowledgement {
    /// "Name: description"
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}: {}", self.badge.name, self.badge.description)
    }

    /// Whether still visible at `now`
    #[inline]
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Transient on-screen acknowledgements
///
/// Several badges earned by one completion are all kept, in the order
/// they were raised, each with its own expiry.
#[derive(Debug)]
pub struct ToastBoard {
    lifetime: Duration,
    toasts: Mutex<Vec<Acknowledgement>>,
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastBoard {
    /// Board with the default lifetime
    #[must_use]
    pub fn new() -> Self {
        Self::with_lifetime(DEFAULT_TOAST_LIFETIME)
    }

    /// Board with a custom lifetime
    #[must_use]
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            lifetime,
            toasts: Mutex::new(Vec::new()),
        }
    }

    /// Configured lifetime
    #[inline]
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Raise acknowledgements as of `now`
    pub fn raise_at(&self, badges: &[Badge], now: Instant) {
        let expires_at = now + self.lifetime;
        self.toasts
            .lock()
            .extend(badges.iter().cloned().map(|badge| Acknowledgement {
                badge,
                raised_at: now,
                expires_at,
            }));
    }

    /// Acknowledgements still visible at `now`, oldest first
    #[must_use]
    pub fn active(&self, now: Instant) -> Vec<Acknowledgement> {
        self.toasts
            .lock()
            .iter()
            .filter(|toast| toast.is_active(now))
            .cloned()
            .collect()
    }

    /// Drop expired acknowledgements, returning how many were removed
    pub fn dismiss_expired(&self, now: Instant) -> usize {
        let mut toasts = self.toasts.lock();
        let before = toasts.len();
        toasts.retain(|toast| toast.is_active(now));
        before - toasts.len()
    }

    /// Remove and return everything, expired or not
    pub fn drain(&self) -> Vec<Acknowledgement> {
        std::mem::take(&mut *self.toasts.lock())
    }

    /// Number of held acknowledgements
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    /// Whether nothing is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, badges: &[Badge]) {
        self.raise_at(badges, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextstep_catalog::{BadgeCategory, ProgressKey};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn badge(id: u32, name: &str) -> Badge {
        Badge::new(
            id,
            name,
            "test badge",
            BadgeCategory::Milestone,
            ProgressKey::EventsAttended,
            1,
        )
    }

    #[test]
    fn toasts_expire_after_lifetime() {
        let board = ToastBoard::new();
        let start = Instant::now();
        board.raise_at(&[badge(1, "First Step"), badge(5, "Volunteer")], start);

        let visible = board.active(start + Duration::from_secs(4));
        let names: Vec<_> = visible.iter().map(|t| t.badge.name.as_str()).collect();
        assert_eq!(names, vec!["First Step", "Volunteer"]);

        assert!(board.active(start + DEFAULT_TOAST_LIFETIME).is_empty());
        assert_eq!(board.dismiss_expired(start + Duration::from_secs(6)), 2);
        assert!(board.is_empty());
    }

    #[test]
    fn later_toasts_outlive_earlier_ones() {
        let board = ToastBoard::with_lifetime(Duration::from_secs(2));
        let start = Instant::now();
        board.raise_at(&[badge(1, "First Step")], start);
        board.raise_at(&[badge(8, "Voice of Change")], start + Duration::from_secs(1));

        assert_eq!(board.dismiss_expired(start + Duration::from_secs(2)), 1);
        let left = board.drain();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].message(), "Voice of Change: test badge");
    }

    #[test]
    fn empty_notification_raises_nothing() {
        let board = ToastBoard::new();
        board.notify(&[]);
        assert_eq!(board.len(), 0);
    }

    #[test]
    fn closure_notifier_sees_each_badge() {
        let seen = AtomicUsize::new(0);
        let notifier = NotifyFn(|_: &Badge| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        notifier.notify(&[badge(1, "a"), badge(2, "b"), badge(3, "c")]);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn pair_fans_out() {
        let board = ToastBoard::new();
        let pair = (&board, LogNotifier);
        pair.notify(&[badge(1, "First Step")]);
        assert_eq!(board.len(), 1);
    }
}
