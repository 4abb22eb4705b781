#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared HTTP DTOs for the Justice airdrop API.
//!
//! Every field the backend may omit carries a serde default so that an absent
//! key decodes to the same value the frontend would fall back to anyway
//! (`count` to zero, `notifications` to an empty list, URLs to `None`).

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Username shown for leaderboard rows without one.
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

/// Opaque notification identifier.
///
/// The backend emits integer ids, but nothing in the frontend depends on that;
/// numbers and strings decode to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawNotificationId", into = "String")]
pub struct NotificationId(String);

impl NotificationId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<NotificationId> for String {
    fn from(value: NotificationId) -> Self {
        value.0
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNotificationId {
    Int(i64),
    Text(String),
}

impl From<RawNotificationId> for NotificationId {
    fn from(raw: RawNotificationId) -> Self {
        match raw {
            RawNotificationId::Int(value) => Self(value.to_string()),
            RawNotificationId::Text(value) => Self(value),
        }
    }
}

/// A single user notification as returned by `/notify/user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// Message body.
    #[serde(default)]
    pub message: String,
    /// Creation timestamp as emitted by the backend (ISO-8601).
    #[serde(default)]
    pub created_at: String,
    /// Read flag, when the backend reports one.
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Human-readable creation time.
    ///
    /// Accepts RFC 3339 and naive ISO-8601 timestamps; anything else is
    /// returned verbatim.
    #[must_use]
    pub fn display_time(&self) -> String {
        const FORMAT: &str = "%Y-%m-%d %H:%M";
        let raw = self.created_at.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.format(FORMAT).to_string();
        }
        if let Ok(parsed) = raw.parse::<NaiveDateTime>() {
            return parsed.format(FORMAT).to_string();
        }
        raw.to_string()
    }
}

/// Response body of `/notify/count/{user}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCount {
    /// Unread notification count.
    #[serde(default)]
    pub count: u64,
}

/// Response body of `/notify/user/{user}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationList {
    /// Most recent notifications first.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Response body of the mark-read endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkReadResponse {
    /// Whether the backend accepted the request.
    #[serde(default)]
    pub ok: bool,
    /// Number of notifications flipped by a bulk call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked: Option<u64>,
    /// Identifier echoed by a single-item call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NotificationId>,
}

/// Referral statistics for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralStats {
    /// Display name, when known.
    #[serde(default)]
    pub username: Option<String>,
    /// Number of successful referrals.
    #[serde(default)]
    pub referrals: u64,
    /// Reward balance.
    #[serde(default)]
    pub balance: f64,
    /// Server-issued referral link.
    #[serde(default)]
    pub referral_link: Option<String>,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Display name.
    #[serde(default = "anonymous_username")]
    pub username: String,
    /// Number of successful referrals.
    #[serde(default)]
    pub referrals: u64,
    /// Reward balance.
    #[serde(default)]
    pub balance: f64,
}

fn anonymous_username() -> String {
    ANONYMOUS_USERNAME.to_string()
}

/// Acknowledgement returned by the referral click/register endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralAck {
    /// Whether the backend recorded the event.
    #[serde(default)]
    pub ok: bool,
    /// Updated referral count for the referrer, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrals: Option<u64>,
    /// Updated referrer balance, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

/// Response body of `/api/logo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoResponse {
    /// Logo asset URL, absent when the backend has none.
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Response body of `/api/video`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    /// Welcome video asset URL, absent when the backend has none.
    #[serde(default)]
    pub video_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_ids_accept_numbers_and_strings() {
        let numeric: Notification =
            serde_json::from_value(json!({"id": 42, "message": "hi", "created_at": ""}))
                .expect("numeric id");
        let textual: Notification =
            serde_json::from_value(json!({"id": "42", "message": "hi", "created_at": ""}))
                .expect("string id");
        assert_eq!(numeric.id, textual.id);
        assert_eq!(numeric.id.as_str(), "42");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let count: NotificationCount = serde_json::from_value(json!({})).expect("count");
        assert_eq!(count.count, 0);
        let list: NotificationList = serde_json::from_value(json!({})).expect("list");
        assert!(list.notifications.is_empty());
        let logo: LogoResponse =
            serde_json::from_value(json!({"logo_url": null})).expect("logo");
        assert!(logo.logo_url.is_none());
    }

    #[test]
    fn leaderboard_rows_default_to_anonymous() {
        let rows: Vec<LeaderboardEntry> =
            serde_json::from_value(json!([{"referrals": 3, "balance": 30.0}])).expect("rows");
        assert_eq!(rows[0].username, ANONYMOUS_USERNAME);
        assert_eq!(rows[0].referrals, 3);
    }

    #[test]
    fn display_time_handles_naive_and_offset_timestamps() {
        let mut note = Notification {
            id: NotificationId::new("1"),
            message: String::new(),
            created_at: "2024-05-01T12:30:45.123456".to_string(),
            read: false,
        };
        assert_eq!(note.display_time(), "2024-05-01 12:30");

        note.created_at = "2024-05-01T08:05:00+02:00".to_string();
        assert_eq!(note.display_time(), "2024-05-01 08:05");

        note.created_at = "yesterday".to_string();
        assert_eq!(note.display_time(), "yesterday");
    }
}
