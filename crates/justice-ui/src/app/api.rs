//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot from the resolved settings.
//! - Strict calls go through `client`; bootstrap reads use the fail-soft `fetchers`.

use crate::core::settings::UiSettings;
use justice_client::{ApiClient, Fetchers, PollerConfig};
use std::rc::Rc;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub(crate) client: Rc<ApiClient>,
    /// Fail-soft view over the same client.
    pub(crate) fetchers: Rc<Fetchers>,
    /// Poller timing.
    pub(crate) poller: PollerConfig,
}

impl ApiCtx {
    /// Create a new context from resolved settings.
    pub(crate) fn new(settings: UiSettings) -> Self {
        let client = ApiClient::new(settings.client);
        Self {
            fetchers: Rc::new(Fetchers::new(client.clone())),
            client: Rc::new(client),
            poller: settings.poller,
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
