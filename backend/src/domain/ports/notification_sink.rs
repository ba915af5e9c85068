//! Port for outbound notification delivery.

use async_trait::async_trait;

use crate::domain::notifications::Notification;

/// Errors raised by notification sink adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationSinkError {
    /// The message could not be handed to the delivery channel.
    #[error("notification delivery failed: {message}")]
    Delivery {
        /// Adapter-supplied context.
        message: String,
    },
}

impl NotificationSinkError {
    /// Builds a [`NotificationSinkError::Delivery`].
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Fire-and-forget notification channel.
///
/// Enqueueing happens strictly after the workflow's transaction commits.
/// Failures are logged by the caller and never abort or roll back the
/// financial and state changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Queues a notification for delivery.
    async fn enqueue(&self, notification: &Notification) -> Result<(), NotificationSinkError>;
}
