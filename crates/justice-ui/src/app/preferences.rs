//! Persistence and environment helpers for the app shell.

use crate::core::settings::{RawSettings, UiSettings};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;

pub(crate) const BACKEND_URL_KEY: &str = "justice.backend_url";
pub(crate) const USER_ID_KEY: &str = "justice.user_id";
pub(crate) const TOKEN_KEY: &str = "justice.token";
pub(crate) const POLL_INTERVAL_KEY: &str = "justice.poll_interval_ms";

/// Resolve client and poller settings from local storage.
pub(crate) fn load_settings() -> UiSettings {
    UiSettings::resolve(RawSettings {
        backend_url: read_key(BACKEND_URL_KEY),
        user_id: read_key(USER_ID_KEY),
        token: read_key(TOKEN_KEY),
        poll_interval_ms: read_key(POLL_INTERVAL_KEY),
    })
}

fn read_key(key: &str) -> Option<String> {
    LocalStorage::get::<String>(key)
        .or_else(|_| LocalStorage::get::<u64>(key).map(|value| value.to_string()))
        .ok()
}

/// Page origin, used to build referral links.
pub(crate) fn page_origin() -> Option<String> {
    match window().location().origin() {
        Ok(origin) => Some(origin),
        Err(err) => {
            console::error!("location origin unavailable", err);
            None
        }
    }
}

/// Raw query string of the current page.
pub(crate) fn page_query() -> String {
    window().location().search().unwrap_or_default()
}
