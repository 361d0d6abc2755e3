//! User-facing notifications (toasts).
//!
//! SYSTEM CONTEXT
//! ==============
//! The integration only decides *what* to tell the user. Rendering belongs to
//! whoever implements `Notifier`: the CLI logs them, a UI forwards them over a
//! channel to its toast layer.

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }
}

/// Sink for notifications. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(text = %notification.message, "notification"),
            NotificationLevel::Error => tracing::warn!(text = %notification.message, "notification"),
        }
    }
}

/// Forwards notifications to a UI task. Dropped if the receiver is gone.
impl Notifier for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        if self.send(notification).is_err() {
            tracing::debug!("notification receiver closed");
        }
    }
}
