//! The booking aggregate and its lifecycle state machine.
//!
//! A booking is created `Pending` when a client reserves a property and is
//! only ever mutated through [`Booking::transition_to`]. The total price is
//! priced once at reservation time and never recomputed afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date_range::DateRange;
use super::events::{BookingLifecycle, BookingLifecycleEvent};
use super::money::Money;
use super::user::UserId;

/// Lifecycle states of a booking.
///
/// Legal transitions: `Pending → {Confirmed, Rejected, Cancelled}` and
/// `Confirmed → {Cancelled, Completed}`. `Rejected`, `Cancelled` and
/// `Completed` are terminal, and nothing ever reverts to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// Accepted; the stay is reserved and the fee has been charged.
    Confirmed,
    /// Declined by the owner or lost to an overlapping confirmation.
    Rejected,
    /// Withdrawn by the client.
    Cancelled,
    /// The stay has taken place.
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Errors raised by illegal status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingTransitionError {
    /// The booking is already in the requested status.
    #[error("booking is already {status}")]
    SameStatus {
        /// Current (and requested) status.
        status: BookingStatus,
    },
    /// Bookings never go back to the initial state.
    #[error("bookings cannot revert to pending")]
    RevertToPending,
    /// Confirmation and rejection are decisions on a pending booking.
    #[error("only pending bookings can become {target}, current status is {current}")]
    NotPending {
        /// Requested status.
        target: BookingStatus,
        /// Actual status.
        current: BookingStatus,
    },
    /// Only a confirmed stay can complete.
    #[error("only confirmed bookings can be completed, current status is {current}")]
    NotConfirmed {
        /// Actual status.
        current: BookingStatus,
    },
    /// Finished stays can no longer be cancelled or rejected.
    #[error("completed bookings cannot become {target}")]
    AlreadyCompleted {
        /// Requested status.
        target: BookingStatus,
    },
    /// Rejected bookings cannot subsequently be cancelled.
    #[error("closed bookings cannot be cancelled, current status is {current}")]
    AlreadyClosed {
        /// Actual status.
        current: BookingStatus,
    },
}

/// Validation errors raised when constructing a booking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// The guest name is required.
    #[error("guest name must not be empty")]
    EmptyGuestName,
    /// The contact phone number is required.
    #[error("phone number must not be empty")]
    EmptyPhoneNumber,
}

/// Input payload for [`Booking::new`].
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub id: Uuid,
    pub client_id: UserId,
    pub property_id: Uuid,
    pub guest_name: String,
    pub phone_number: String,
    pub range: DateRange,
    pub total_price: Money,
    pub reserved_at: DateTime<Utc>,
}

/// A client's reservation of a property for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: Uuid,
    client_id: UserId,
    property_id: Uuid,
    guest_name: String,
    phone_number: String,
    range: DateRange,
    total_price: Money,
    status: BookingStatus,
    reserved_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Creates a validated, `Pending` booking.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingValidationError> {
        Self::try_from(draft)
    }

    /// Returns the booking id.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the reserving client.
    pub const fn client_id(&self) -> UserId {
        self.client_id
    }

    /// Returns the booked property.
    pub const fn property_id(&self) -> Uuid {
        self.property_id
    }

    /// Returns the guest name given at reservation time.
    pub fn guest_name(&self) -> &str {
        self.guest_name.as_str()
    }

    /// Returns the contact phone number.
    pub fn phone_number(&self) -> &str {
        self.phone_number.as_str()
    }

    /// Returns the booked stay range.
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the price snapshot taken at reservation time.
    pub const fn total_price(&self) -> &Money {
        &self.total_price
    }

    /// Returns the current lifecycle status.
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the reservation timestamp.
    pub const fn reserved_at(&self) -> DateTime<Utc> {
        self.reserved_at
    }

    /// Returns the timestamp of the last status change, if any.
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Moves the booking to `next`, enforcing the lifecycle matrix.
    ///
    /// On success the booking records `now` as its update time and returns
    /// the lifecycle event for downstream notification dispatch.
    pub fn transition_to(
        &mut self,
        next: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<BookingLifecycleEvent, BookingTransitionError> {
        let lifecycle = self.check_transition(next)?;
        self.status = next;
        self.updated_at = Some(now);
        Ok(BookingLifecycleEvent {
            lifecycle,
            booking_id: self.id,
            client_id: self.client_id,
            property_id: self.property_id,
            range: self.range,
        })
    }

    fn check_transition(
        &self,
        next: BookingStatus,
    ) -> Result<BookingLifecycle, BookingTransitionError> {
        let current = self.status;
        if next == current {
            return Err(BookingTransitionError::SameStatus { status: current });
        }
        match next {
            BookingStatus::Pending => Err(BookingTransitionError::RevertToPending),
            BookingStatus::Confirmed => match current {
                BookingStatus::Pending => Ok(BookingLifecycle::Confirmed),
                _ => Err(BookingTransitionError::NotPending {
                    target: next,
                    current,
                }),
            },
            BookingStatus::Rejected => match current {
                BookingStatus::Pending => Ok(BookingLifecycle::Rejected),
                BookingStatus::Completed => {
                    Err(BookingTransitionError::AlreadyCompleted { target: next })
                }
                _ => Err(BookingTransitionError::NotPending {
                    target: next,
                    current,
                }),
            },
            BookingStatus::Cancelled => match current {
                BookingStatus::Pending | BookingStatus::Confirmed => {
                    Ok(BookingLifecycle::Cancelled)
                }
                BookingStatus::Completed => {
                    Err(BookingTransitionError::AlreadyCompleted { target: next })
                }
                BookingStatus::Rejected | BookingStatus::Cancelled => {
                    Err(BookingTransitionError::AlreadyClosed { current })
                }
            },
            BookingStatus::Completed => match current {
                BookingStatus::Confirmed => Ok(BookingLifecycle::Completed),
                _ => Err(BookingTransitionError::NotConfirmed { current }),
            },
        }
    }
}

impl TryFrom<BookingDraft> for Booking {
    type Error = BookingValidationError;

    fn try_from(value: BookingDraft) -> Result<Self, Self::Error> {
        if value.guest_name.trim().is_empty() {
            return Err(BookingValidationError::EmptyGuestName);
        }
        if value.phone_number.trim().is_empty() {
            return Err(BookingValidationError::EmptyPhoneNumber);
        }
        Ok(Self {
            id: value.id,
            client_id: value.client_id,
            property_id: value.property_id,
            guest_name: value.guest_name,
            phone_number: value.phone_number,
            range: value.range,
            total_price: value.total_price,
            status: BookingStatus::Pending,
            reserved_at: value.reserved_at,
            updated_at: None,
        })
    }
}

#[cfg(test)]
#[path = "booking_tests.rs"]
mod tests;
