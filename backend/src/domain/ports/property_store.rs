//! Port for the property subset the booking core reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::date_range::DateRange;
use crate::domain::property::Property;

use super::StoreError;

/// Transactional read/append access to properties.
///
/// The core never mutates a property beyond appending to its
/// unavailable-date set on confirmation.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Finds a property by id.
    async fn get_by_id(&self, property_id: Uuid) -> Result<Option<Property>, StoreError>;

    /// Stages an append to the property's unavailable-date set.
    async fn append_unavailable_range(
        &self,
        property_id: Uuid,
        range: DateRange,
    ) -> Result<(), StoreError>;
}
