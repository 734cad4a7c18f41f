use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::domain::{ApplicationId, ApplicationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
}

/// User-facing message emitted when an application changes status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Message announcing that `company` moved the application to `status`.
    pub fn for_transition(
        application_id: ApplicationId,
        company: &str,
        status: ApplicationStatus,
    ) -> Self {
        let (title, message, severity) = match status {
            ApplicationStatus::Submitted => (
                "Application Sent",
                format!("Your application to {company} has been submitted."),
                Severity::Info,
            ),
            ApplicationStatus::UnderReview => (
                "Status Updated",
                format!("{company} has started reviewing your application."),
                Severity::Info,
            ),
            ApplicationStatus::Accepted => (
                "Congratulations!",
                format!("{company} invites you to the next stage. Check your email."),
                Severity::Success,
            ),
            ApplicationStatus::Rejected => (
                "Update",
                format!("{company} has decided not to move forward with your application."),
                Severity::Info,
            ),
        };

        Self {
            application_id,
            status,
            title: title.to_string(),
            message,
            severity,
        }
    }
}

/// Outbound hook for status notifications (UI toast, push, e-mail adapters).
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification receiver closed")]
    Closed,
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Keeps every published notification in memory, in publish order.
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn for_application(&self, id: &ApplicationId) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter(|event| &event.application_id == id)
            .collect()
    }
}

impl NotificationSink for NotificationLog {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}

/// Forwards notifications to an async consumer.
#[derive(Debug, Clone)]
pub struct ChannelNotifications {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifications {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationSink for ChannelNotifications {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.sender
            .send(notification)
            .map_err(|_| NotificationError::Closed)
    }
}
