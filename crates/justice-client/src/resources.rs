//! Strict typed calls for every backend endpoint.
//!
//! These propagate [`ApiError`] so callers that must tell "failed" apart from
//! "empty" (the poller, the notification panel) can do so. UI bootstrap code
//! should go through [`crate::Fetchers`] instead.

use justice_api_models::{
    LeaderboardEntry, LogoResponse, MarkReadResponse, Notification, NotificationCount,
    NotificationId, NotificationList, ReferralAck, ReferralStats, VideoResponse,
};
use urlencoding::encode;

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;

/// Number of notifications the panel requests when opened.
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 20;

impl ApiClient {
    fn require_user(&self) -> ApiResult<&str> {
        self.identity()
            .user_id()
            .ok_or_else(|| ApiError::InvalidRequest("no user id configured".into()))
    }

    /// Unread notification count for the session user.
    ///
    /// # Errors
    /// Any wrapper failure, or [`ApiError::InvalidRequest`] without a user id.
    pub async fn notification_count(&self) -> ApiResult<u64> {
        let user = encode(self.require_user()?);
        let body: NotificationCount = self.get_json(&format!("/notify/count/{user}")).await?;
        Ok(body.count)
    }

    /// Up to `limit` most recent notifications for the session user.
    ///
    /// # Errors
    /// Any wrapper failure, or [`ApiError::InvalidRequest`] without a user id.
    pub async fn notifications(&self, limit: usize) -> ApiResult<Vec<Notification>> {
        let user = encode(self.require_user()?);
        let body: NotificationList = self
            .get_json(&format!("/notify/user/{user}?limit={limit}"))
            .await?;
        Ok(body.notifications)
    }

    /// Mark a single notification as read.
    ///
    /// # Errors
    /// Any wrapper failure (a missing id surfaces as a 404 status).
    pub async fn mark_read(&self, id: &NotificationId) -> ApiResult<MarkReadResponse> {
        let id = encode(id.as_str());
        self.post_json(&format!("/notify/read_one/{id}"), None).await
    }

    /// Mark every notification of the session user as read.
    ///
    /// # Errors
    /// Any wrapper failure, or [`ApiError::InvalidRequest`] without a user id.
    pub async fn mark_all_read(&self) -> ApiResult<MarkReadResponse> {
        let user = encode(self.require_user()?);
        self.post_json(&format!("/notify/read/{user}"), None).await
    }

    /// Referral statistics for the session user.
    ///
    /// # Errors
    /// Any wrapper failure, or [`ApiError::InvalidRequest`] without a user id.
    pub async fn referral_stats(&self) -> ApiResult<ReferralStats> {
        let user = encode(self.require_user()?);
        self.get_json(&format!("/referral/stats?user_id={user}")).await
    }

    /// Global referral leaderboard.
    ///
    /// # Errors
    /// Any wrapper failure.
    pub async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        self.get_json("/referral/leaderboard").await
    }

    /// Record that the session user followed `referrer`'s link.
    ///
    /// # Errors
    /// Any wrapper failure, or [`ApiError::InvalidRequest`] without a user id.
    pub async fn record_referral_click(&self, referrer: &str) -> ApiResult<ReferralAck> {
        let path = self.referral_path("click", referrer)?;
        self.post_json(&path, None).await
    }

    /// Record that the session user registered through `referrer`.
    ///
    /// # Errors
    /// Any wrapper failure, or [`ApiError::InvalidRequest`] without a user id.
    pub async fn record_referral_register(&self, referrer: &str) -> ApiResult<ReferralAck> {
        let path = self.referral_path("register", referrer)?;
        self.post_json(&path, None).await
    }

    fn referral_path(&self, action: &str, referrer: &str) -> ApiResult<String> {
        let referrer = referrer.trim();
        if referrer.is_empty() {
            return Err(ApiError::InvalidRequest("referrer must not be empty".into()));
        }
        let user = encode(self.require_user()?);
        Ok(format!(
            "/referral/{action}?user_id={user}&referrer={}",
            encode(referrer)
        ))
    }

    /// Logo asset URL, resolved against the backend.
    ///
    /// # Errors
    /// Any wrapper failure.
    pub async fn logo_url(&self) -> ApiResult<Option<String>> {
        let body: LogoResponse = self.get_json("/api/logo").await?;
        Ok(self.resolve_asset(body.logo_url))
    }

    /// Welcome video asset URL, resolved against the backend.
    ///
    /// # Errors
    /// Any wrapper failure.
    pub async fn video_url(&self) -> ApiResult<Option<String>> {
        let body: VideoResponse = self.get_json("/api/video").await?;
        Ok(self.resolve_asset(body.video_url))
    }

    fn resolve_asset(&self, url: Option<String>) -> Option<String> {
        url.filter(|value| !value.trim().is_empty())
            .map(|value| self.config().asset_url(&value))
    }
}

/// Shareable referral link for `user_id` under the page `origin`.
#[must_use]
pub fn referral_link(origin: &str, user_id: &str) -> String {
    format!(
        "{}/register?ref={}",
        origin.trim_end_matches('/'),
        encode(user_id.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::new(server.base_url()).with_user_id("42"))
    }

    #[test]
    fn referral_link_encodes_the_user() {
        assert_eq!(
            referral_link("https://justice.app/", "42"),
            "https://justice.app/register?ref=42"
        );
        assert_eq!(
            referral_link("https://justice.app", "a b"),
            "https://justice.app/register?ref=a%20b"
        );
    }

    #[tokio::test]
    async fn notifications_request_the_limit_for_the_session_user() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/notify/user/42")
                .query_param("limit", "20");
            then.status(200).json_body(json!({
                "notifications": [
                    {"id": 1, "message": "Welcome", "created_at": "2024-05-01T10:00:00", "read": false},
                    {"id": 2, "message": "Bonus", "created_at": "2024-05-02T10:00:00", "read": false}
                ]
            }));
        });

        let notes = client_for(&server)
            .notifications(DEFAULT_NOTIFICATION_LIMIT)
            .await
            .expect("list");

        mock.assert();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id.as_str(), "1");
        assert_eq!(notes[1].message, "Bonus");
    }

    #[tokio::test]
    async fn mark_all_read_targets_the_session_user() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/notify/read/42");
            then.status(200).json_body(json!({"ok": true, "marked": 3}));
        });

        let response = client_for(&server).mark_all_read().await.expect("mark all");

        mock.assert();
        assert!(response.ok);
        assert_eq!(response.marked, Some(3));
    }

    #[tokio::test]
    async fn referral_click_sends_user_and_referrer() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/referral/click")
                .query_param("user_id", "42")
                .query_param("referrer", "9");
            then.status(200).json_body(json!({"ok": true}));
        });

        let ack = client_for(&server)
            .record_referral_click("9")
            .await
            .expect("click recorded");

        mock.assert();
        assert!(ack.ok);
    }

    #[tokio::test]
    async fn empty_referrer_is_rejected_before_sending() {
        let server = MockServer::start_async().await;
        let err = client_for(&server)
            .record_referral_register("  ")
            .await
            .expect_err("blank referrer");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn user_scoped_calls_require_a_user_id() {
        let server = MockServer::start_async().await;
        let client = ApiClient::new(ClientConfig::new(server.base_url()).with_user_id(""));
        let err = client.notification_count().await.expect_err("no user");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn relative_logo_paths_resolve_against_the_backend() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/logo");
            then.status(200)
                .json_body(json!({"logo_url": "/static/logo/justice.png"}));
        });

        let logo = client_for(&server).logo_url().await.expect("logo");
        assert_eq!(
            logo,
            Some(format!("{}/static/logo/justice.png", server.base_url()))
        );
    }
}
