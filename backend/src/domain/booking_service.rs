//! Booking workflows.
//!
//! [`BookingService`] orchestrates the reservation and lifecycle workflows.
//! Confirmation is the involved one: it composes the booking state machine,
//! the wallet ledger, the property's unavailable set, and overlap
//! resolution inside a single unit of work, then fans notifications out
//! once the transaction has committed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::booking::{Booking, BookingDraft, BookingStatus};
use super::date_range::DateRange;
use super::events::{BookingLifecycle, BookingLifecycleEvent};
use super::money::Money;
use super::notifications::{Notification, NotificationKind};
use super::ports::{NotificationSink, TxScope, UnitOfWork, UnitOfWorkFactory, UserDirectory};
use super::pricing;
use super::property::ContactPolicy;
use super::user::UserId;
use super::workflow_error::WorkflowError;

/// Business policy inputs for the booking workflows.
///
/// Kept as configuration rather than a constant so the core stays testable
/// independent of policy changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Fixed fee charged to the client's wallet at confirmation time,
    /// denominated in the property's currency. Distinct from the total
    /// rental price.
    pub confirmation_fee: Decimal,
}

/// Input payload for [`BookingService::reserve`].
#[derive(Debug, Clone)]
pub struct ReserveBookingRequest {
    /// Client placing the reservation.
    pub client_id: UserId,
    /// Property being booked.
    pub property_id: Uuid,
    /// Guest name for the stay.
    pub guest_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Requested stay start.
    pub start: DateTime<Utc>,
    /// Requested stay end (exclusive).
    pub end: DateTime<Utc>,
}

/// Reservation and lifecycle workflows over the booking core.
#[derive(Clone)]
pub struct BookingService {
    uow: Arc<dyn UnitOfWorkFactory>,
    directory: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    policy: BookingPolicy,
}

impl BookingService {
    /// Creates the service with its collaborators and policy.
    pub fn new(
        uow: Arc<dyn UnitOfWorkFactory>,
        directory: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            uow,
            directory,
            notifications,
            clock,
            policy,
        }
    }

    /// Reads a booking by id.
    pub async fn get(&self, booking_id: Uuid) -> Result<Booking, WorkflowError> {
        let read = self.uow.begin(TxScope::ReadOnly).await?;
        read.bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(WorkflowError::BookingNotFound { booking_id })
    }

    /// Creates a `Pending` booking for a property.
    ///
    /// The total price is computed here, once, from the property's current
    /// rate and discount, and never recomputed afterwards. The requested
    /// range must not collide with the property's unavailable set.
    pub async fn reserve(&self, request: ReserveBookingRequest) -> Result<Booking, WorkflowError> {
        let uow = self.uow.begin(TxScope::Property(request.property_id)).await?;
        let now = self.clock.utc();

        let property = uow
            .properties()
            .get_by_id(request.property_id)
            .await?
            .ok_or(WorkflowError::PropertyNotFound {
                property_id: request.property_id,
            })?;

        let range = DateRange::new(request.start, request.end)?;
        if !property.is_available_for(&range) {
            return Err(WorkflowError::RangeUnavailable);
        }

        let total_price =
            pricing::quote_for_range(property.nightly_rate(), property.discount(), &range);
        let booking = Booking::new(BookingDraft {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            property_id: request.property_id,
            guest_name: request.guest_name,
            phone_number: request.phone_number,
            range,
            total_price,
            reserved_at: now,
        })?;

        uow.bookings().add(&booking).await?;
        uow.commit().await?;

        info!(
            booking_id = %booking.id(),
            property_id = %booking.property_id(),
            total_price = %booking.total_price(),
            "booking reserved",
        );
        self.dispatch(vec![Notification {
            recipient: property.owner_id(),
            kind: NotificationKind::BookingAwaitingReview {
                booking_id: booking.id(),
                range,
            },
        }])
        .await;

        Ok(booking)
    }

    /// Confirms a pending booking.
    ///
    /// All steps run inside one unit of work serialised on the property:
    /// the status transition, the fixed-fee deduction with its ledger
    /// entry, the unavailable-range append, and the auto-rejection of
    /// competing pending bookings. If any step fails, nothing commits —
    /// not the status change, not the deduction, not the rejections.
    /// Notifications go out only after the commit succeeds.
    pub async fn confirm(&self, booking_id: Uuid) -> Result<Booking, WorkflowError> {
        let property_id = self.property_scope_of(booking_id).await?;
        let uow = self.uow.begin(TxScope::Property(property_id)).await?;
        let now = self.clock.utc();

        let mut booking = uow
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(WorkflowError::BookingNotFound { booking_id })?;
        let property = uow
            .properties()
            .get_by_id(booking.property_id())
            .await?
            .ok_or(WorkflowError::PropertyNotFound {
                property_id: booking.property_id(),
            })?;
        let owner = self
            .directory
            .get_by_id(property.owner_id())
            .await?
            .ok_or(WorkflowError::OwnerNotFound {
                owner_id: property.owner_id(),
            })?;

        // Status change first: an illegal transition aborts before any
        // money moves.
        let confirmed = booking.transition_to(BookingStatus::Confirmed, now)?;
        uow.bookings().update(&booking).await?;

        let mut wallet = uow
            .wallets()
            .get_by_user_id(booking.client_id())
            .await?
            .ok_or(WorkflowError::WalletNotFound {
                user_id: booking.client_id(),
            })?;
        let fee = Money::try_new(
            self.policy.confirmation_fee,
            property.nightly_rate().currency().clone(),
        )?;
        let entry = wallet.deduct_funds(
            &fee,
            format!("confirmation fee for booking {booking_id}"),
            now,
        )?;
        uow.wallets().update(&wallet).await?;
        uow.ledger().append(&entry).await?;

        uow.properties()
            .append_unavailable_range(property.id(), booking.range())
            .await?;

        let rejected = self.reject_overlapping(uow.as_ref(), &booking, now).await?;

        let owner_phone = match property.contact_policy() {
            ContactPolicy::OwnerPhoneShared => Some(owner.phone_number.clone()),
            ContactPolicy::PlatformOnly => None,
        };
        let mut notifications = Vec::with_capacity(rejected.len() + 1);
        notifications.push(Notification {
            recipient: confirmed.client_id,
            kind: NotificationKind::BookingConfirmed {
                booking_id: confirmed.booking_id,
                fee: fee.clone(),
                owner_phone,
            },
        });
        for event in &rejected {
            notifications.push(Notification {
                recipient: event.client_id,
                kind: NotificationKind::BookingLostToConflict {
                    booking_id: event.booking_id,
                    range: event.range,
                },
            });
        }

        uow.commit().await?;

        info!(
            booking_id = %booking_id,
            property_id = %property.id(),
            fee = %fee,
            auto_rejected = rejected.len(),
            "booking confirmed",
        );
        self.dispatch(notifications).await;

        Ok(booking)
    }

    /// Declines a pending booking on the owner's behalf.
    ///
    /// The client is told they may be refund-eligible; no automatic refund
    /// is issued.
    pub async fn reject(&self, booking_id: Uuid) -> Result<Booking, WorkflowError> {
        self.transition_workflow(booking_id, BookingStatus::Rejected).await
    }

    /// Cancels a pending or confirmed booking.
    pub async fn cancel(&self, booking_id: Uuid) -> Result<Booking, WorkflowError> {
        self.transition_workflow(booking_id, BookingStatus::Cancelled).await
    }

    /// Marks a confirmed stay as completed.
    pub async fn complete(&self, booking_id: Uuid) -> Result<Booking, WorkflowError> {
        self.transition_workflow(booking_id, BookingStatus::Completed).await
    }

    /// Transitions every confirmed booking whose stay has ended to
    /// `Completed`.
    ///
    /// Each booking commits in its own property-scoped transaction so the
    /// sweep never blocks the confirmation path; individual failures are
    /// logged and skipped. Returns the number of bookings completed.
    pub async fn sweep_completions(&self) -> Result<u32, WorkflowError> {
        let now = self.clock.utc();
        let due = {
            let read = self.uow.begin(TxScope::ReadOnly).await?;
            read.bookings().get_confirmed_ending_before(now).await?
        };

        let mut completed = 0u32;
        for stale in due {
            match self.complete_expired(stale.id(), stale.property_id(), now).await {
                Ok(true) => completed += 1,
                Ok(false) => {}
                Err(error) => {
                    warn!(
                        booking_id = %stale.id(),
                        error = %error,
                        "completion sweep skipped booking",
                    );
                }
            }
        }
        Ok(completed)
    }

    /// Rejection, cancellation and completion share a shape: one status
    /// transition committed alone, then a single client notification.
    async fn transition_workflow(
        &self,
        booking_id: Uuid,
        target: BookingStatus,
    ) -> Result<Booking, WorkflowError> {
        let property_id = self.property_scope_of(booking_id).await?;
        let uow = self.uow.begin(TxScope::Property(property_id)).await?;
        let now = self.clock.utc();

        let mut booking = uow
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(WorkflowError::BookingNotFound { booking_id })?;
        let event = booking.transition_to(target, now)?;
        uow.bookings().update(&booking).await?;
        uow.commit().await?;

        info!(booking_id = %booking_id, status = %target, "booking status changed");
        self.dispatch(Self::lifecycle_notification(&event).into_iter().collect())
            .await;

        Ok(booking)
    }

    async fn complete_expired(
        &self,
        booking_id: Uuid,
        property_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, WorkflowError> {
        let uow = self.uow.begin(TxScope::Property(property_id)).await?;
        let Some(mut booking) = uow.bookings().get_by_id(booking_id).await? else {
            return Ok(false);
        };
        // Re-check under the lock; a cancel may have won the race.
        if booking.status() != BookingStatus::Confirmed || !booking.range().ended_by(now) {
            return Ok(false);
        }

        let event = booking.transition_to(BookingStatus::Completed, now)?;
        uow.bookings().update(&booking).await?;
        uow.commit().await?;

        self.dispatch(Self::lifecycle_notification(&event).into_iter().collect())
            .await;
        Ok(true)
    }

    /// Auto-rejects competing pending bookings that intersect the winner's
    /// range. Bookings in any other status are left untouched: first
    /// confirmed wins.
    async fn reject_overlapping(
        &self,
        uow: &dyn UnitOfWork,
        winner: &Booking,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingLifecycleEvent>, WorkflowError> {
        let overlapping = uow
            .bookings()
            .get_overlapping(winner.property_id(), winner.range())
            .await?;

        let mut events = Vec::new();
        for mut other in overlapping {
            if other.id() == winner.id() || other.status() != BookingStatus::Pending {
                continue;
            }
            let event = other.transition_to(BookingStatus::Rejected, now)?;
            uow.bookings().update(&other).await?;
            events.push(event);
        }
        Ok(events)
    }

    /// Opens a short read-only transaction to learn which property the
    /// booking belongs to, so the real transaction can take the right
    /// advisory lock. The booking is re-read under that lock.
    async fn property_scope_of(&self, booking_id: Uuid) -> Result<Uuid, WorkflowError> {
        let read = self.uow.begin(TxScope::ReadOnly).await?;
        let booking = read
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(WorkflowError::BookingNotFound { booking_id })?;
        Ok(booking.property_id())
    }

    /// Maps a lifecycle event to its client notification. Confirmation is
    /// handled inline by [`BookingService::confirm`], which enriches the
    /// message with the fee and owner contact details.
    fn lifecycle_notification(event: &BookingLifecycleEvent) -> Option<Notification> {
        let kind = match event.lifecycle {
            BookingLifecycle::Confirmed => return None,
            BookingLifecycle::Rejected => NotificationKind::BookingDeclined {
                booking_id: event.booking_id,
                refund_eligible: true,
            },
            BookingLifecycle::Cancelled => NotificationKind::BookingCancelled {
                booking_id: event.booking_id,
            },
            BookingLifecycle::Completed => NotificationKind::BookingCompleted {
                booking_id: event.booking_id,
            },
        };
        Some(Notification {
            recipient: event.client_id,
            kind,
        })
    }

    /// Best-effort fan-out after commit. Delivery failures are logged and
    /// never surfaced: the financial and state changes stand.
    async fn dispatch(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            if let Err(error) = self.notifications.enqueue(&notification).await {
                warn!(
                    recipient = %notification.recipient,
                    error = %error,
                    "notification delivery failed",
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
