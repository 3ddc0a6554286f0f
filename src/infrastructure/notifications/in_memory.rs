use crate::core::errors::MediSlotError;
use crate::infrastructure::notifications::{Notification, Notifier};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        InMemoryNotifier {
            notifications: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Notifications that have not timed out yet.
    pub async fn active(&self) -> Vec<Notification> {
        let now = Utc::now();
        let notifications = self.notifications.read().await;
        notifications.iter().filter(|n| n.is_active(now)).cloned().collect()
    }

    pub async fn messages(&self) -> Vec<String> {
        let notifications = self.notifications.read().await;
        notifications.iter().map(|n| n.message.clone()).collect()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), MediSlotError> {
        let mut notifications = self.notifications.write().await;
        notifications.push(notification);
        Ok(())
    }

    async fn history(&self) -> Result<Vec<Notification>, MediSlotError> {
        let notifications = self.notifications.read().await;
        Ok(notifications.clone())
    }
}
