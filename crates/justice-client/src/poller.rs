//! Tokio-driven notification poller for native targets.
//!
//! # Design
//! - One task owns the [`PollState`]; scheduled ticks and manual refreshes are
//!   funnelled through the same loop, so cycles never overlap.
//! - The first cycle runs immediately; later ticks use
//!   [`MissedTickBehavior::Delay`] so a slow backend never causes a burst.
//! - `stop` is idempotent and waits for an in-flight cycle to finish.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::http::ApiClient;
use crate::poll::{PollOutcome, PollState, PollerConfig, poll_cycle};

/// Lifecycle of a [`NotificationPoller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerStatus {
    /// No timer is running.
    Idle,
    /// The timer is running.
    Polling,
}

struct Running {
    stop: watch::Sender<bool>,
    refresh: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

/// Periodic unread-count poller.
pub struct NotificationPoller {
    client: ApiClient,
    config: PollerConfig,
    running: Option<Running>,
}

impl NotificationPoller {
    /// Idle poller for `client`; the interval is clamped to
    /// [`MIN_POLL_INTERVAL`](crate::poll::MIN_POLL_INTERVAL).
    #[must_use]
    pub fn new(client: ApiClient, config: PollerConfig) -> Self {
        Self {
            client,
            config: config.clamped(),
            running: None,
        }
    }

    /// Current lifecycle state. A loop that exited on its own reports `Idle`.
    #[must_use]
    pub fn status(&self) -> PollerStatus {
        if self
            .running
            .as_ref()
            .is_some_and(|running| !running.task.is_finished())
        {
            PollerStatus::Polling
        } else {
            PollerStatus::Idle
        }
    }

    /// Start polling and return the outcome stream.
    ///
    /// Returns `None` when the poller is already running.
    pub fn start(&mut self) -> Option<mpsc::UnboundedReceiver<PollOutcome>> {
        if self.status() == PollerStatus::Polling {
            return None;
        }
        let (stop, stop_rx) = watch::channel(false);
        let (refresh, refresh_rx) = mpsc::unbounded_channel();
        let (events, events_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_loop(
            self.client.clone(),
            self.config,
            stop_rx,
            refresh_rx,
            events,
        ));
        let interval_ms = u64::try_from(self.config.interval.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(interval_ms, "notification poller started");
        self.running = Some(Running {
            stop,
            refresh,
            task,
        });
        Some(events_rx)
    }

    /// Request an immediate cycle (e.g. after marking notifications read).
    ///
    /// Returns `false` when the poller is idle.
    pub fn refresh(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| running.refresh.send(()).is_ok())
    }

    /// Stop the timer and wait for the loop to exit.
    ///
    /// Returns `false` when the poller was already idle.
    pub async fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };
        let _ = running.stop.send(true);
        if let Err(err) = running.task.await {
            tracing::warn!(error = %err, "notification poller task ended abnormally");
        }
        tracing::info!("notification poller stopped");
        true
    }
}

async fn run_loop(
    client: ApiClient,
    config: PollerConfig,
    mut stop: watch::Receiver<bool>,
    mut refresh: mpsc::UnboundedReceiver<()>,
    events: mpsc::UnboundedSender<PollOutcome>,
) {
    let mut state = PollState::new();
    let mut ticker = time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
            Some(()) = refresh.recv() => {}
        }

        let outcome = poll_cycle(&client, &mut state).await;
        if events.send(outcome).is_err() {
            break;
        }
    }
}
