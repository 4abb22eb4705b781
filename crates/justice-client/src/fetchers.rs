//! Fail-soft resource accessors.
//!
//! Each accessor wraps a strict call from [`crate::resources`] and converts
//! any [`ApiError`] into the documented default (zero, empty list, `None`,
//! `false`), logging the failure. Nothing here returns an error.

use justice_api_models::{LeaderboardEntry, Notification, NotificationId, ReferralStats};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;

/// Fail-soft view over an [`ApiClient`].
#[derive(Clone, Debug)]
pub struct Fetchers {
    client: ApiClient,
}

impl Fetchers {
    /// Wrap a client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Referral statistics, `None` on failure.
    pub async fn fetch_referral_stats(&self) -> Option<ReferralStats> {
        soften("referral stats", self.client.referral_stats().await.map(Some))
    }

    /// Leaderboard rows, empty on failure.
    pub async fn fetch_leaderboard(&self) -> Vec<LeaderboardEntry> {
        soften("leaderboard", self.client.leaderboard().await)
    }

    /// Record a referral click; `false` when the backend did not accept it.
    pub async fn record_referral_click(&self, referrer: &str) -> bool {
        soften(
            "referral click",
            self.client
                .record_referral_click(referrer)
                .await
                .map(|ack| ack.ok),
        )
    }

    /// Record a referral registration; `false` when the backend did not accept it.
    pub async fn record_referral_register(&self, referrer: &str) -> bool {
        soften(
            "referral register",
            self.client
                .record_referral_register(referrer)
                .await
                .map(|ack| ack.ok),
        )
    }

    /// Unread notification count, zero on failure.
    pub async fn fetch_notification_count(&self) -> u64 {
        soften("notification count", self.client.notification_count().await)
    }

    /// Recent notifications, empty on failure.
    pub async fn fetch_notifications(&self, limit: usize) -> Vec<Notification> {
        soften("notifications", self.client.notifications(limit).await)
    }

    /// Mark one notification read; `false` on failure.
    pub async fn mark_read(&self, id: &NotificationId) -> bool {
        soften("mark read", self.client.mark_read(id).await.map(|ack| ack.ok))
    }

    /// Mark every notification of the session user read; `false` on failure.
    pub async fn mark_all_read(&self) -> bool {
        soften("mark all read", self.client.mark_all_read().await.map(|ack| ack.ok))
    }

    /// Logo URL, `None` on failure or when the backend has none.
    pub async fn fetch_logo(&self) -> Option<String> {
        soften("logo", self.client.logo_url().await)
    }

    /// Welcome video URL, `None` on failure or when the backend has none.
    pub async fn fetch_video(&self) -> Option<String> {
        soften("video", self.client.video_url().await)
    }
}

fn soften<T: Default>(resource: &'static str, result: ApiResult<T>) -> T {
    result.unwrap_or_else(|err: ApiError| {
        tracing::warn!(resource, status = err.status(), error = %err, "fetch failed; using default");
        T::default()
    })
}
