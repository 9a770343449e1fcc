//! Notification events published to whatever presentation layer is listening.
//!
//! Publishers never see their consumers: an HTTP handler, a CLI prompt or a
//! logging task each take their own receiver from [`EventBus::subscribe`].

use serde::Serialize;
use tokio::sync::broadcast;

/// Enough to absorb a burst of submissions while a slow consumer catches up.
const BUS_CAPACITY: usize = 64;

/// Severity of a notification, rendered as a success or error toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Cloneable fan-out channel for [`Notification`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Notification>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publish a notification. Returns how many subscribers received it.
    pub fn publish(&self, notification: Notification) -> usize {
        match self.tx.send(notification) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(dropped)) => {
                tracing::debug!(
                    kind = ?dropped.kind,
                    title = %dropped.title,
                    "notification published with no subscribers"
                );
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
