//! Toast-style notification sink

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Number of notifications kept for `/notifications` by default
pub const DEFAULT_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// Display hints passed along with each notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub position: String,
    /// Milliseconds before the toast closes itself
    pub auto_close: u64,
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            position: "bottom-right".to_string(),
            auto_close: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub options: NotificationOptions,
    pub timestamp: DateTime<Utc>,
}

/// Fan-out sink for user-facing notifications.
///
/// Every notification is logged, broadcast to live subscribers and kept in a
/// bounded history. Clones share the same channel and history.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
    history: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(100);
        Self {
            tx,
            history: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message, NotificationOptions::default());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Warning, message, NotificationOptions::default());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message, NotificationOptions::default());
    }

    pub fn notify(&self, level: NotificationLevel, message: impl Into<String>, options: NotificationOptions) {
        let notification = Notification {
            level,
            message: message.into(),
            options,
            timestamp: Utc::now(),
        };

        match level {
            NotificationLevel::Success => info!("Notification: {}", notification.message),
            NotificationLevel::Warning => warn!("Notification: {}", notification.message),
            NotificationLevel::Error => error!("Notification: {}", notification.message),
        }

        if let Ok(mut history) = self.history.lock() {
            if self.capacity > 0 {
                if history.len() == self.capacity {
                    history.pop_front();
                }
                history.push_back(notification.clone());
            }
        }

        // No receivers is the normal case when nobody is listening
        let _ = self.tx.send(notification);
    }

    /// Subscribe to notifications emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Most recent notifications, oldest first
    pub fn recent(&self) -> Vec<Notification> {
        self.history
            .lock()
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Count recent notifications with exactly this message
    pub fn count_message(&self, message: &str) -> usize {
        self.recent().iter().filter(|n| n.message == message).count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded_and_ordered() {
        let notifier = Notifier::new(2);
        notifier.success("one");
        notifier.warning("two");
        notifier.error("three");

        let recent = notifier.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "two");
        assert_eq!(recent[0].level, NotificationLevel::Warning);
        assert_eq!(recent[1].message, "three");
        assert_eq!(recent[1].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn subscribers_receive_notifications() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();
        notifier.success("Timer Started");

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Timer Started");
        assert_eq!(received.options, NotificationOptions::default());
    }

    #[test]
    fn options_serialize_in_camel_case() {
        let json = serde_json::to_value(NotificationOptions::default()).unwrap();
        assert_eq!(json["position"], "bottom-right");
        assert_eq!(json["autoClose"], 2000);
    }
}
