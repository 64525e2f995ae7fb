//! Transient, auto-dismissing notifications.
//!
//! Every user-visible outcome in the client is reported as a toast: a short
//! message with a severity and a dwell time. The [`Notifier`] is a cheap
//! clone handle over a shared queue; producers push, the embedding surface
//! renders [`Notifier::active`] and calls [`Notifier::sweep`] on its frame
//! tick to expire old toasts.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

/// How long cart toasts stay visible.
pub const CART_TOAST_DWELL: Duration = Duration::from_secs(3);

/// How long admin and audit toasts stay visible.
pub const ADMIN_TOAST_DWELL: Duration = Duration::from_secs(5);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// Parse a severity label, falling back to `Info` for anything unknown.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "success" => Self::Success,
            "error" | "danger" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Style class for the rendering surface.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A single visible toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    shown_at: Instant,
    dwell: Duration,
}

impl Notification {
    /// Whether this toast has outlived its dwell time as of `now`.
    #[must_use]
    pub fn expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.dwell
    }
}

/// Shared notification queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a toast and return its id.
    pub fn push(&self, kind: NotificationKind, message: impl Into<String>, dwell: Duration) -> Uuid {
        self.push_at(kind, message, dwell, Instant::now())
    }

    /// Push with an explicit timestamp. Exists so expiry is testable.
    pub fn push_at(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        dwell: Duration,
        shown_at: Instant,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let message = message.into();
        tracing::debug!(%id, ?kind, %message, "showing notification");
        self.lock().push(Notification {
            id,
            kind,
            message,
            shown_at,
            dwell,
        });
        id
    }

    /// Dismiss a toast early. Dismissing an unknown or already-dismissed id
    /// is a no-op; the dismiss button can race the dwell timer.
    pub fn dismiss(&self, id: Uuid) {
        self.lock().retain(|n| n.id != id);
    }

    /// Drop every toast whose dwell time has elapsed as of `now`.
    pub fn sweep(&self, now: Instant) {
        self.lock().retain(|n| !n.expired_at(now));
    }

    /// Snapshot of the currently visible toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // A poisoned queue only means a panic mid-push; the data is still
        // a valid Vec.
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_label_falls_back_to_info() {
        assert_eq!(NotificationKind::from_label("sparkles"), NotificationKind::Info);
        assert_eq!(NotificationKind::from_label(""), NotificationKind::Info);
        assert_eq!(NotificationKind::from_label("success"), NotificationKind::Success);
    }

    #[test]
    fn test_push_and_dismiss() {
        let notifier = Notifier::new();
        let id = notifier.push(NotificationKind::Success, "Item added to cart", CART_TOAST_DWELL);
        assert_eq!(notifier.active().len(), 1);

        notifier.dismiss(id);
        assert!(notifier.active().is_empty());

        // Second dismiss of the same id is a no-op.
        notifier.dismiss(id);
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_sweep_expires_only_elapsed_toasts() {
        let notifier = Notifier::new();
        let start = Instant::now();
        notifier.push_at(NotificationKind::Success, "old", CART_TOAST_DWELL, start);
        notifier.push_at(
            NotificationKind::Info,
            "fresh",
            ADMIN_TOAST_DWELL,
            start + Duration::from_secs(3),
        );

        notifier.sweep(start + Duration::from_secs(4));

        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "fresh");
    }

    #[test]
    fn test_clones_share_one_queue() {
        let notifier = Notifier::new();
        let handle = notifier.clone();
        handle.push(NotificationKind::Warning, "Select users to delete", ADMIN_TOAST_DWELL);
        assert_eq!(notifier.active().len(), 1);
    }
}
