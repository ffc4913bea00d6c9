//! Transient user notifications (the snackbar).
//!
//! Pages push messages; whoever owns the receiving end renders them. With
//! no listener attached, notifications are dropped.

use std::time::Duration;

use tokio::sync::mpsc;

pub const DEFAULT_ACTION: &str = "Close";
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub action: &'static str,
    pub duration: Duration,
}

impl Notification {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), action: DEFAULT_ACTION, duration: DEFAULT_DURATION }
    }
}

#[derive(Clone, Debug)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, message: impl Into<String>) {
        let notification = Notification::new(message);
        tracing::debug!(message = %notification.message, "notify");
        if self.tx.send(notification).is_err() {
            tracing::debug!("notification dropped: no listener");
        }
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;
