use crate::core::errors::MediSlotError;
use crate::infrastructure::notifications::{Notification, NotificationKind, Notifier};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Prints notifications to stderr as they arrive and remembers them for the
/// rest of the run.
#[derive(Clone, Default)]
pub struct TerminalNotifier {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        TerminalNotifier::default()
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "[ok]",
        NotificationKind::Warning => "[!!]",
        NotificationKind::Error => "[error]",
    };
    format!("{} {}", marker, notification.message)
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), MediSlotError> {
        {
            let mut stderr = std::io::stderr().lock();
            writeln!(stderr, "{}", format_notification(&notification))?;
        }
        self.shown.lock().await.push(notification);
        Ok(())
    }

    async fn history(&self) -> Result<Vec<Notification>, MediSlotError> {
        Ok(self.shown.lock().await.clone())
    }
}
