//! Notification panel state.
//!
//! # Design
//! - The compact indicators and the detailed entries are two views over one
//!   list, so removing an id removes both representations at once.
//! - Hiding never refreshes; only opening fetches.
//! - A failed list fetch renders the error placeholder, never a stale list.
//! - Every open starts a new generation; list results from an earlier open
//!   are dropped.

use justice_api_models::{Notification, NotificationId};
use justice_client::ApiResult;

pub use justice_client::resources::DEFAULT_NOTIFICATION_LIMIT;

/// Placeholder shown when there is nothing to list.
pub const EMPTY_PLACEHOLDER: &str = "No notifications";
/// Placeholder shown when the list fetch failed.
pub const ERROR_PLACEHOLDER: &str = "Error";

/// What the panel body currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelBody {
    /// Fetch in flight.
    Loading,
    /// Unread notifications, most recent first.
    Items(Vec<Notification>),
    /// Empty-state placeholder.
    Empty,
    /// Error placeholder.
    Error,
}

/// Effect requested by a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelToggle {
    /// The panel opened; the caller must fetch the list.
    Fetch,
    /// The panel closed.
    Hidden,
}

/// Minimal per-notification marker in the summary row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactIndicator {
    /// Notification the marker stands for.
    pub id: NotificationId,
    /// Tooltip text (the full message).
    pub tooltip: String,
}

/// Panel visibility plus rendered content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelState {
    /// Whether the panel is shown.
    pub open: bool,
    /// Rendered content.
    pub body: PanelBody,
    /// How many notifications to request when opening.
    pub limit: usize,
    generation: u64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            open: false,
            body: PanelBody::Empty,
            limit: DEFAULT_NOTIFICATION_LIMIT,
            generation: 0,
        }
    }
}

impl PanelState {
    /// Flip visibility. Opening switches the body to [`PanelBody::Loading`].
    pub fn toggle(&mut self) -> PanelToggle {
        if self.open {
            self.open = false;
            PanelToggle::Hidden
        } else {
            self.open = true;
            self.generation += 1;
            self.body = PanelBody::Loading;
            PanelToggle::Fetch
        }
    }

    /// Generation of the most recent open; pass it back to [`Self::apply_fetch`].
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Render the result of the list fetch started at `generation`.
    ///
    /// Returns `false` and changes nothing when the panel was hidden or
    /// reopened since that fetch started.
    pub fn apply_fetch(&mut self, generation: u64, fetched: ApiResult<Vec<Notification>>) -> bool {
        if !self.open || generation != self.generation {
            return false;
        }
        self.body = match fetched {
            Ok(items) if items.is_empty() => PanelBody::Empty,
            Ok(items) => PanelBody::Items(items),
            Err(_) => PanelBody::Error,
        };
        true
    }

    /// Drop every representation of `id`; returns whether it was rendered.
    pub fn remove(&mut self, id: &NotificationId) -> bool {
        let PanelBody::Items(items) = &mut self.body else {
            return false;
        };
        let before = items.len();
        items.retain(|item| &item.id != id);
        let removed = items.len() != before;
        if items.is_empty() {
            self.body = PanelBody::Empty;
        }
        removed
    }

    /// Clear the list to the empty-state placeholder.
    pub fn clear_all(&mut self) {
        self.body = PanelBody::Empty;
    }

    /// Detailed entries currently rendered.
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        match &self.body {
            PanelBody::Items(items) => items,
            _ => &[],
        }
    }

    /// Compact indicators currently rendered.
    #[must_use]
    pub fn compact_indicators(&self) -> Vec<CompactIndicator> {
        self.entries()
            .iter()
            .map(|item| CompactIndicator {
                id: item.id.clone(),
                tooltip: item.message.clone(),
            })
            .collect()
    }

    /// Placeholder text for non-list bodies.
    #[must_use]
    pub const fn placeholder(&self) -> Option<&'static str> {
        match self.body {
            PanelBody::Empty => Some(EMPTY_PLACEHOLDER),
            PanelBody::Error => Some(ERROR_PLACEHOLDER),
            PanelBody::Loading | PanelBody::Items(_) => None,
        }
    }
}
