//! Toast queue: newest first, bounded, dismissed by id.

use std::time::Duration;

use justice_client::ToastNotice;

use crate::models::{Toast, ToastKind};

/// Maximum number of toasts kept on screen.
pub const MAX_VISIBLE_TOASTS: usize = 4;

/// Ordered collection of visible toasts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    /// Visible toasts, newest first.
    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Prepend a toast and return its id. The oldest entries fall off once
    /// more than [`MAX_VISIBLE_TOASTS`] are queued.
    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
        ttl: Duration,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.insert(
            0,
            Toast {
                id,
                title: title.into(),
                message: message.into(),
                kind,
                ttl_ms: u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX),
            },
        );
        self.items.truncate(MAX_VISIBLE_TOASTS);
        id
    }

    /// Prepend the toast raised by a poll cycle.
    pub fn push_notice(&mut self, notice: &ToastNotice, ttl: Duration) -> u64 {
        self.push(ToastKind::Info, &notice.title, &notice.message, ttl)
    }

    /// Remove a toast; returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }
}
