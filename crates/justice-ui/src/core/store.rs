//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Every reducer is synchronous; async work finishes before it dispatches,
//!   so the poll timer and panel refreshes never interleave a read-modify-write.
//! - Poll cycles take a ticket before fetching; a response older than the last
//!   completed cycle is discarded, so completion order never regresses the badge.

use std::time::Duration;

use justice_api_models::{LeaderboardEntry, ReferralStats};
use justice_client::{ApiResult, PollOutcome, PollState};
use yewdux::store::Store;

use crate::core::panel::PanelState;
use crate::core::toast::ToastQueue;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Badge, poll bookkeeping, and panel.
    pub notifications: NotificationSlice,
    /// Visible toasts.
    pub toasts: ToastQueue,
    /// Referral dashboard data.
    pub referral: ReferralSlice,
}

/// Notification badge and panel state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationSlice {
    /// Count shown on the bell badge.
    pub badge: u64,
    /// Last observed count used for toast decisions.
    pub poll: PollState,
    /// Popup panel.
    pub panel: PanelState,
    issued: u64,
    completed: u64,
}

/// Referral stats and leaderboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferralSlice {
    /// Stats for the session user.
    pub stats: Option<ReferralStats>,
    /// Global leaderboard.
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Shareable link for the session user.
    pub link: Option<String>,
}

impl NotificationSlice {
    /// Ticket for a poll cycle that is about to fetch.
    pub const fn begin_poll(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record completion of `ticket`; returns `false` when a newer cycle
    /// already completed.
    const fn complete_poll(&mut self, ticket: u64) -> bool {
        if ticket <= self.completed {
            return false;
        }
        self.completed = ticket;
        true
    }
}

impl AppStore {
    /// Reconcile a finished count fetch: update the badge and queue a toast
    /// when the count grew. Failures and stale tickets leave the badge at its
    /// last value.
    pub fn apply_poll(
        &mut self,
        ticket: u64,
        fetched: ApiResult<u64>,
        toast_ttl: Duration,
    ) -> PollOutcome {
        if !self.notifications.complete_poll(ticket) {
            return PollOutcome::Skipped;
        }
        let outcome = self.notifications.poll.apply(fetched);
        if let PollOutcome::Updated { count, toast } = &outcome {
            self.notifications.badge = *count;
            if let Some(notice) = toast {
                self.toasts.push_notice(notice, toast_ttl);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use justice_client::ApiError;
    use justice_client::poll::DEFAULT_TOAST_TTL;

    fn poll(store: &mut AppStore, fetched: ApiResult<u64>) -> PollOutcome {
        let ticket = store.notifications.begin_poll();
        store.apply_poll(ticket, fetched, DEFAULT_TOAST_TTL)
    }

    #[test]
    fn badge_tracks_the_latest_completed_poll() {
        let mut store = AppStore::default();
        poll(&mut store, Ok(1));
        poll(&mut store, Ok(3));

        assert_eq!(store.notifications.badge, 3);
        assert_eq!(store.notifications.poll.last_observed(), 3);
        assert_eq!(store.toasts.items().len(), 2);
        assert_eq!(
            store.toasts.items()[0].message,
            "You have 3 unread notification(s)"
        );
    }

    #[test]
    fn decrease_updates_badge_without_a_toast() {
        let mut store = AppStore::default();
        poll(&mut store, Ok(4));
        poll(&mut store, Ok(0));

        assert_eq!(store.notifications.badge, 0);
        assert_eq!(store.toasts.items().len(), 1);
    }

    #[test]
    fn failed_poll_keeps_the_stale_badge() {
        let mut store = AppStore::default();
        poll(&mut store, Ok(2));
        let outcome = poll(
            &mut store,
            Err(ApiError::Status {
                status: 500,
                body: "down".into(),
            }),
        );

        assert_eq!(outcome, PollOutcome::Skipped);
        assert_eq!(store.notifications.badge, 2);
        assert_eq!(store.toasts.items().len(), 1);
    }

    #[test]
    fn late_response_from_an_older_cycle_is_discarded() {
        let mut store = AppStore::default();
        let slow = store.notifications.begin_poll();
        let fast = store.notifications.begin_poll();

        store.apply_poll(fast, Ok(3), DEFAULT_TOAST_TTL);
        let stale = store.apply_poll(slow, Ok(5), DEFAULT_TOAST_TTL);

        assert_eq!(stale, PollOutcome::Skipped);
        assert_eq!(store.notifications.badge, 3);
        assert_eq!(store.notifications.poll.last_observed(), 3);
        assert_eq!(store.toasts.items().len(), 1);
        assert_eq!(poll(&mut store, Ok(5)).count(), Some(5));
        assert_eq!(store.toasts.items().len(), 2);
    }
}
