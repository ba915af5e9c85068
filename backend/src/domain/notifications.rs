//! Notification payloads composed by the booking workflows.
//!
//! Notifications are a best-effort side channel: they are handed to the sink
//! only after the surrounding transaction commits, and a delivery failure is
//! logged rather than rolled back.

use serde::Serialize;
use uuid::Uuid;

use super::date_range::DateRange;
use super::money::Money;
use super::user::UserId;

/// What a notification tells its recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NotificationKind {
    /// Sent to the owner when a client reserves one of their properties.
    BookingAwaitingReview {
        /// The new pending booking.
        booking_id: Uuid,
        /// Requested stay.
        range: DateRange,
    },
    /// Sent to the client whose booking was confirmed.
    BookingConfirmed {
        /// The confirmed booking.
        booking_id: Uuid,
        /// Fee deducted from the client's wallet.
        fee: Money,
        /// Owner phone number, present when the property shares it.
        owner_phone: Option<String>,
    },
    /// Sent to a client whose pending booking lost an overlap conflict.
    BookingLostToConflict {
        /// The auto-rejected booking.
        booking_id: Uuid,
        /// The contested stay.
        range: DateRange,
    },
    /// Sent to the client when the owner declines their booking.
    BookingDeclined {
        /// The rejected booking.
        booking_id: Uuid,
        /// Whether the client may claim a refund through support. No
        /// automatic refund is issued.
        refund_eligible: bool,
    },
    /// Sent to the client when their booking is cancelled.
    BookingCancelled {
        /// The cancelled booking.
        booking_id: Uuid,
    },
    /// Sent to the client when their stay completes.
    BookingCompleted {
        /// The completed booking.
        booking_id: Uuid,
    },
}

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Target user.
    pub recipient: UserId,
    /// Message content.
    pub kind: NotificationKind,
}

impl Notification {
    /// Renders a human-readable message for plain-text sinks.
    pub fn message(&self) -> String {
        match &self.kind {
            NotificationKind::BookingAwaitingReview { booking_id, range } => format!(
                "New booking request {booking_id} for {} to {} is awaiting your review.",
                range.start(),
                range.end(),
            ),
            NotificationKind::BookingConfirmed {
                booking_id,
                fee,
                owner_phone,
            } => match owner_phone {
                Some(phone) => format!(
                    "Booking {booking_id} is confirmed. A fee of {fee} was deducted from \
                     your wallet. You can reach the owner at {phone}.",
                ),
                None => format!(
                    "Booking {booking_id} is confirmed. A fee of {fee} was deducted from \
                     your wallet.",
                ),
            },
            NotificationKind::BookingLostToConflict { booking_id, range } => format!(
                "Booking {booking_id} for {} to {} was rejected because the dates were \
                 confirmed for another guest.",
                range.start(),
                range.end(),
            ),
            NotificationKind::BookingDeclined {
                booking_id,
                refund_eligible,
            } => {
                if *refund_eligible {
                    format!(
                        "Booking {booking_id} was declined by the owner. You may be \
                         eligible for a refund; contact support to claim it.",
                    )
                } else {
                    format!("Booking {booking_id} was declined by the owner.")
                }
            }
            NotificationKind::BookingCancelled { booking_id } => {
                format!("Booking {booking_id} was cancelled.")
            }
            NotificationKind::BookingCompleted { booking_id } => {
                format!("Booking {booking_id} is complete. Thanks for staying with us!")
            }
        }
    }
}
