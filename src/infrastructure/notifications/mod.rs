pub mod in_memory;
pub mod terminal;

use crate::core::errors::MediSlotError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL_MS: i64 = 3000;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        let timestamp = Utc::now();
        Notification {
            kind,
            message: message.into(),
            timestamp,
            expires_at: timestamp + Duration::milliseconds(NOTIFICATION_TTL_MS),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), MediSlotError>;
    async fn history(&self) -> Result<Vec<Notification>, MediSlotError>;

    async fn success(&self, message: &str) -> Result<(), MediSlotError> {
        self.notify(Notification::new(NotificationKind::Success, message)).await
    }

    async fn warning(&self, message: &str) -> Result<(), MediSlotError> {
        self.notify(Notification::new(NotificationKind::Warning, message)).await
    }

    async fn error(&self, message: &str) -> Result<(), MediSlotError> {
        self.notify(Notification::new(NotificationKind::Error, message)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notifications::in_memory::InMemoryNotifier;
    use crate::infrastructure::notifications::terminal::format_notification;

    #[test]
    fn notification_expires_after_ttl() {
        let notification = Notification::new(NotificationKind::Warning, "Please fill all fields");
        assert!(notification.is_active(notification.timestamp));
        assert!(notification.is_active(notification.timestamp + Duration::milliseconds(2999)));
        assert!(!notification.is_active(notification.timestamp + Duration::milliseconds(NOTIFICATION_TTL_MS)));
        assert_eq!(format_notification(&notification), "[!!] Please fill all fields");
    }

    #[tokio::test]
    async fn in_memory_notifier_keeps_history() {
        let notifier = InMemoryNotifier::new();
        notifier.success("Login Successful").await.unwrap();
        notifier.error("Booking failed").await.unwrap();

        let history = notifier.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].kind, NotificationKind::Error);
        assert_eq!(notifier.active().await.len(), 2);
        assert_eq!(notifier.messages().await, vec!["Login Successful", "Booking failed"]);
    }
}
