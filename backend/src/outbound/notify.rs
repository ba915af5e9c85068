//! Notification sink adapters.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::notifications::Notification;
use crate::domain::ports::{NotificationSink, NotificationSinkError};

/// Sink that logs each notification instead of delivering it.
///
/// Stands in for a real push or e-mail channel; the rendered message and the
/// structured payload both land in the log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn enqueue(&self, notification: &Notification) -> Result<(), NotificationSinkError> {
        info!(
            recipient = %notification.recipient,
            message = %notification.message(),
            "notification enqueued",
        );
        Ok(())
    }
}

/// Sink that records every notification for later assertion.
///
/// Shared by unit and integration suites, so it lives here rather than
/// behind `cfg(test)`.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink(Mutex<Vec<Notification>>);

impl RecordingNotificationSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything enqueued so far, in order.
    pub fn sent(&self) -> Vec<Notification> {
        match self.0.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn enqueue(&self, notification: &Notification) -> Result<(), NotificationSinkError> {
        let mut sent = match self.0.lock() {
            Ok(sent) => sent,
            Err(poisoned) => poisoned.into_inner(),
        };
        sent.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use uuid::Uuid;

    use super::*;
    use crate::domain::notifications::NotificationKind;
    use crate::domain::user::UserId;

    fn cancelled_for(recipient: UserId) -> Notification {
        Notification {
            recipient,
            kind: NotificationKind::BookingCancelled {
                booking_id: Uuid::new_v4(),
            },
        }
    }

    #[tokio::test]
    async fn recorder_preserves_order() {
        let sink = RecordingNotificationSink::new();
        let first = cancelled_for(UserId::random());
        let second = cancelled_for(UserId::random());

        sink.enqueue(&first).await.expect("enqueue succeeds");
        sink.enqueue(&second).await.expect("enqueue succeeds");

        assert_eq!(sink.sent(), vec![first, second]);
    }

    #[tokio::test]
    async fn tracing_sink_always_accepts() {
        let sink = TracingNotificationSink;
        sink.enqueue(&cancelled_for(UserId::random()))
            .await
            .expect("enqueue succeeds");
    }
}
