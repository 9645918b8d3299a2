//! Notification bus
//!
//! Toasts and sticky error messages go through an injected
//! [`NotificationService`] rather than a process-wide bus.

use crate::types::Notification;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// Receiver of user-facing notifications
///
/// Fire-and-forget: there is no acknowledgment.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Show a notification
    async fn notify(&self, notification: Notification);
}

/// Notification service keeping everything it is sent
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToastType;

    #[tokio::test]
    async fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::sticky_error("first")).await;
        notifier
            .notify(Notification {
                kind: ToastType::Success,
                title: "Registered".to_string(),
                message: "second".to_string(),
                sticky: true,
            })
            .await;

        let messages: Vec<_> = notifier
            .notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
