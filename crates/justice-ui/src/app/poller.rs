//! Browser notification poller.
//!
//! # Design
//! - One gloo `Interval` drives scheduled cycles; mark-read actions call
//!   [`poll_now`] directly instead of starting a second timer.
//! - A tick that fires while the previous scheduled cycle is still fetching is
//!   skipped, so scheduled cycles never overlap.
//! - Each cycle takes a store ticket before fetching, then reconciles inside a
//!   single synchronous reducer; responses older than the last completed cycle
//!   are discarded.
//! - Dropping or stopping the handle cancels the interval.

use crate::core::store::AppStore;
use gloo::console;
use gloo::timers::callback::Interval;
use justice_client::{ApiClient, PollerConfig};
use std::cell::Cell;
use std::rc::Rc;
use yewdux::prelude::Dispatch;

/// Run one poll cycle now.
pub(crate) fn poll_now(client: Rc<ApiClient>, dispatch: Dispatch<AppStore>, config: PollerConfig) {
    spawn_cycle(client, dispatch, config, None);
}

fn spawn_cycle(
    client: Rc<ApiClient>,
    dispatch: Dispatch<AppStore>,
    config: PollerConfig,
    in_flight: Option<Rc<Cell<bool>>>,
) {
    let mut ticket = 0;
    dispatch.reduce_mut(|store| ticket = store.notifications.begin_poll());
    yew::platform::spawn_local(async move {
        let fetched = client.notification_count().await;
        if let Err(err) = &fetched {
            console::error!("notification poll failed", err.to_string());
        }
        let mut fetched = Some(fetched);
        dispatch.reduce_mut(|store| {
            if let Some(fetched) = fetched.take() {
                store.apply_poll(ticket, fetched, config.toast_ttl);
            }
        });
        if let Some(in_flight) = in_flight {
            in_flight.set(false);
        }
    });
}

/// Handle owning the polling interval.
pub(crate) struct BrowserPoller {
    interval: Option<Interval>,
}

impl BrowserPoller {
    /// Poll immediately, then on every interval tick.
    pub(crate) fn start(
        client: Rc<ApiClient>,
        dispatch: Dispatch<AppStore>,
        config: PollerConfig,
    ) -> Self {
        let config = config.clamped();
        let in_flight = Rc::new(Cell::new(true));
        spawn_cycle(
            client.clone(),
            dispatch.clone(),
            config,
            Some(in_flight.clone()),
        );
        let period = u32::try_from(config.interval.as_millis()).unwrap_or(u32::MAX);
        let interval = Interval::new(period, move || {
            if in_flight.replace(true) {
                console::debug!("previous notification poll still running; skipping tick");
                return;
            }
            spawn_cycle(
                client.clone(),
                dispatch.clone(),
                config,
                Some(in_flight.clone()),
            );
        });
        Self {
            interval: Some(interval),
        }
    }

    /// Cancel the interval; returns `false` when already stopped.
    pub(crate) fn stop(&mut self) -> bool {
        self.interval.take().map(Interval::cancel).is_some()
    }
}

impl Drop for BrowserPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
