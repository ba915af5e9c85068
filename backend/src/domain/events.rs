//! Lifecycle events raised by aggregate operations.
//!
//! Aggregates return events instead of dispatching side effects themselves;
//! the workflow drains them and hands notifications to the sink only after
//! the surrounding transaction has committed.

use serde::Serialize;
use uuid::Uuid;

use super::date_range::DateRange;
use super::user::UserId;

/// What happened to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingLifecycle {
    /// The booking was confirmed by the property owner.
    Confirmed,
    /// The booking was rejected, either by the owner or by losing an
    /// overlap conflict.
    Rejected,
    /// The booking was cancelled.
    Cancelled,
    /// The stay finished.
    Completed,
}

/// A successful booking status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingLifecycleEvent {
    /// Transition that occurred.
    pub lifecycle: BookingLifecycle,
    /// Booking that transitioned.
    pub booking_id: Uuid,
    /// Client who owns the booking.
    pub client_id: UserId,
    /// Property the booking is for.
    pub property_id: Uuid,
    /// The booked stay.
    pub range: DateRange,
}
