//! The property subset consumed by the booking core.
//!
//! The booking workflow only reads a property's rate and discount and
//! appends to its unavailable-date set on confirmation; the full property
//! lifecycle lives elsewhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date_range::DateRange;
use super::money::{DiscountPercent, Money};
use super::user::UserId;

/// Whether clients are handed the owner's phone number on confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPolicy {
    /// Confirmation notifications include the owner's phone number.
    OwnerPhoneShared,
    /// All contact goes through the platform.
    PlatformOnly,
}

/// A rentable property as seen by the booking core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    id: Uuid,
    owner_id: UserId,
    nightly_rate: Money,
    discount: Option<DiscountPercent>,
    contact_policy: ContactPolicy,
    unavailable: Vec<DateRange>,
}

impl Property {
    /// Creates a property with an empty unavailable set.
    pub const fn new(
        id: Uuid,
        owner_id: UserId,
        nightly_rate: Money,
        discount: Option<DiscountPercent>,
        contact_policy: ContactPolicy,
    ) -> Self {
        Self {
            id,
            owner_id,
            nightly_rate,
            discount,
            contact_policy,
            unavailable: Vec::new(),
        }
    }

    /// Returns the property id.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the business owner.
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the daily rate.
    pub const fn nightly_rate(&self) -> &Money {
        &self.nightly_rate
    }

    /// Returns the standing discount, if any.
    pub const fn discount(&self) -> Option<DiscountPercent> {
        self.discount
    }

    /// Returns the contact policy.
    pub const fn contact_policy(&self) -> ContactPolicy {
        self.contact_policy
    }

    /// Returns the ranges the property is blocked for.
    pub fn unavailable_ranges(&self) -> &[DateRange] {
        self.unavailable.as_slice()
    }

    /// Whether `range` avoids every blocked range.
    pub fn is_available_for(&self, range: &DateRange) -> bool {
        !self.unavailable.iter().any(|blocked| blocked.overlaps(range))
    }

    /// Blocks the property for `range`.
    pub fn mark_unavailable(&mut self, range: DateRange) {
        self.unavailable.push(range);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::money::CurrencyCode;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).single().expect("valid date")
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(day(start), day(end)).expect("valid range")
    }

    fn property() -> Property {
        Property::new(
            Uuid::new_v4(),
            UserId::random(),
            Money::try_new(dec!(100), CurrencyCode::try_new("EUR").expect("valid code"))
                .expect("non-negative amount"),
            None,
            ContactPolicy::PlatformOnly,
        )
    }

    #[test]
    fn fresh_properties_are_fully_available() {
        assert!(property().is_available_for(&range(1, 5)));
    }

    #[test]
    fn blocked_ranges_make_overlapping_stays_unavailable() {
        let mut property = property();
        property.mark_unavailable(range(3, 7));

        assert!(!property.is_available_for(&range(1, 5)));
        assert!(!property.is_available_for(&range(4, 6)));
        // Half-open: a stay ending where the block starts is fine.
        assert!(property.is_available_for(&range(1, 3)));
        assert!(property.is_available_for(&range(7, 9)));
    }
}
