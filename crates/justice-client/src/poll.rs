//! Unread-count reconciliation shared by every poller.
//!
//! # Design
//! - The count fetch is the only suspension point of a cycle; [`PollState::apply`]
//!   runs synchronously afterwards, so concurrent refreshes serialize.
//! - A toast fires only on a strict increase and the observed count is always
//!   overwritten, so a toast never replays for the same value.
//! - A failed fetch leaves the state untouched.

use std::time::Duration;

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Poll period used when nothing else is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30_000);
/// Shortest poll period a poller will run with.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
/// Lifetime of a "new notification" toast.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6_000);
/// Title shown on "new notification" toasts.
pub const TOAST_TITLE: &str = "New notification";

/// Timing knobs for a poller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollerConfig {
    /// Period between count fetches.
    pub interval: Duration,
    /// How long a toast stays visible.
    pub toast_ttl: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            toast_ttl: DEFAULT_TOAST_TTL,
        }
    }
}

impl PollerConfig {
    /// Replace the poll interval, clamped to at least one millisecond.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Copy with the interval raised to [`MIN_POLL_INTERVAL`] when shorter.
    #[must_use]
    pub fn clamped(self) -> Self {
        self.with_interval(self.interval)
    }
}

/// Transient notice raised when the unread count grows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastNotice {
    /// Unread count that triggered the notice.
    pub count: u64,
    /// Heading line.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl ToastNotice {
    /// Notice for `count` unread notifications.
    #[must_use]
    pub fn unread(count: u64) -> Self {
        Self {
            count,
            title: TOAST_TITLE.to_string(),
            message: format!("You have {count} unread notification(s)"),
        }
    }
}

/// Result of reconciling one poll cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The fetch succeeded and the observed count was stored.
    Updated {
        /// Freshly observed count (the new badge value).
        count: u64,
        /// Toast to show, when the count strictly increased.
        toast: Option<ToastNotice>,
    },
    /// The fetch failed; nothing changed.
    Skipped,
}

impl PollOutcome {
    /// New badge value, when the cycle produced one.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        match self {
            Self::Updated { count, .. } => Some(*count),
            Self::Skipped => None,
        }
    }

    /// Toast raised by the cycle.
    #[must_use]
    pub const fn toast(&self) -> Option<&ToastNotice> {
        match self {
            Self::Updated {
                toast: Some(toast), ..
            } => Some(toast),
            _ => None,
        }
    }
}

/// Last observed unread count for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollState {
    last_observed: u64,
}

impl PollState {
    /// Fresh state starting from zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_observed: 0 }
    }

    /// Count stored by the most recent successful cycle.
    #[must_use]
    pub const fn last_observed(&self) -> u64 {
        self.last_observed
    }

    /// Store `count`, returning a toast when it exceeds the previous value.
    pub fn observe(&mut self, count: u64) -> Option<ToastNotice> {
        let toast = (count > self.last_observed).then(|| ToastNotice::unread(count));
        self.last_observed = count;
        toast
    }

    /// Reconcile a completed count fetch.
    pub fn apply(&mut self, fetched: ApiResult<u64>) -> PollOutcome {
        match fetched {
            Ok(count) => PollOutcome::Updated {
                count,
                toast: self.observe(count),
            },
            Err(err) => {
                tracing::warn!(error = %err, "notification poll failed; keeping last count");
                PollOutcome::Skipped
            }
        }
    }
}

/// Run one poll cycle: fetch, then reconcile.
pub async fn poll_cycle(client: &ApiClient, state: &mut PollState) -> PollOutcome {
    let fetched = client.notification_count().await;
    state.apply(fetched)
}
