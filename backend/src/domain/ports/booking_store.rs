//! Port for booking persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::date_range::DateRange;

use super::StoreError;

/// Transactional store for booking aggregates.
///
/// Mutations issued through this port are staged by the owning unit of work
/// and only become visible once it commits.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Finds a booking by id.
    async fn get_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Returns every booking for `property_id` whose stay intersects
    /// `range`, regardless of status.
    ///
    /// Intersection is half-open: a booking ending exactly where `range`
    /// starts is not returned.
    async fn get_overlapping(
        &self,
        property_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Returns confirmed bookings whose stay ended at or before `cutoff`.
    ///
    /// Feeds the periodic completion sweep.
    async fn get_confirmed_ending_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Stages a new booking.
    async fn add(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Stages an update to an existing booking.
    async fn update(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Stages removal of a booking. Peripheral admin operation; the booking
    /// workflows never delete.
    async fn remove(&self, booking_id: Uuid) -> Result<(), StoreError>;
}
