//! Page-level settings assembled from raw storage values.

use std::time::Duration;

use justice_client::config::DEFAULT_BACKEND_URL;
use justice_client::{ClientConfig, PollerConfig};

/// Raw values as read from browser storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSettings {
    /// Backend base URL.
    pub backend_url: Option<String>,
    /// Session user id.
    pub user_id: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
    /// Poll interval in milliseconds.
    pub poll_interval_ms: Option<String>,
}

/// Resolved settings for the app shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiSettings {
    /// HTTP client configuration.
    pub client: ClientConfig,
    /// Poller timing.
    pub poller: PollerConfig,
}

impl UiSettings {
    /// Resolve raw values, falling back to defaults for blank or invalid ones.
    #[must_use]
    pub fn resolve(raw: RawSettings) -> Self {
        let backend = non_blank(raw.backend_url).unwrap_or_else(|| DEFAULT_BACKEND_URL.into());
        let mut client = ClientConfig::new(backend).with_token(non_blank(raw.token));
        if let Some(user_id) = non_blank(raw.user_id) {
            client = client.with_user_id(user_id);
        }

        let mut poller = PollerConfig::default();
        if let Some(ms) = raw
            .poll_interval_ms
            .as_deref()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            poller = poller.with_interval(Duration::from_millis(ms));
        }

        Self { client, poller }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use justice_client::config::DEFAULT_USER_ID;
    use justice_client::poll::DEFAULT_POLL_INTERVAL;

    #[test]
    fn empty_storage_yields_defaults() {
        let settings = UiSettings::resolve(RawSettings::default());
        assert_eq!(settings.client.base_url(), DEFAULT_BACKEND_URL);
        assert_eq!(settings.client.identity.user_id(), Some(DEFAULT_USER_ID));
        assert!(settings.client.identity.token().is_none());
        assert_eq!(settings.poller.interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn stored_values_override_defaults() {
        let settings = UiSettings::resolve(RawSettings {
            backend_url: Some("https://api.justice.app/".into()),
            user_id: Some("77".into()),
            token: Some("jwt".into()),
            poll_interval_ms: Some("10000".into()),
        });
        assert_eq!(settings.client.base_url(), "https://api.justice.app");
        assert_eq!(settings.client.identity.user_id(), Some("77"));
        assert_eq!(settings.client.identity.token(), Some("jwt"));
        assert_eq!(settings.poller.interval, Duration::from_millis(10_000));
    }

    #[test]
    fn invalid_interval_is_ignored() {
        for raw in ["abc", "0", "-5", ""] {
            let settings = UiSettings::resolve(RawSettings {
                poll_interval_ms: Some(raw.into()),
                ..RawSettings::default()
            });
            assert_eq!(settings.poller.interval, DEFAULT_POLL_INTERVAL);
        }
    }
}
