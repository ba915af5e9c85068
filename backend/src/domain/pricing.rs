//! Stay pricing.
//!
//! Pure calculation: nightly rate, optional discount, and a date range in;
//! total [`Money`] out. The result's currency is inherited from the rate and
//! no conversion ever happens here.

use chrono::{DateTime, Utc};

use super::date_range::{DateRange, InvalidDateRange};
use super::money::{DiscountPercent, Money};

/// Errors raised while pricing a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The requested range is empty or inverted.
    #[error(transparent)]
    InvalidRange(#[from] InvalidDateRange),
}

/// Prices a stay from raw bounds.
///
/// Fails with [`PricingError::InvalidRange`] when `start >= end`. Billed
/// nights are the whole days between the bounds, floored at one, and any
/// discount reduces the nightly rate before multiplication.
pub fn calculate_total_price(
    nightly_rate: &Money,
    discount: Option<DiscountPercent>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Money, PricingError> {
    let range = DateRange::new(start, end)?;
    Ok(quote_for_range(nightly_rate, discount, &range))
}

/// Prices a stay over an already-validated range.
pub fn quote_for_range(
    nightly_rate: &Money,
    discount: Option<DiscountPercent>,
    range: &DateRange,
) -> Money {
    let effective_rate = match discount {
        Some(discount) => nightly_rate.with_discount(discount),
        None => nightly_rate.clone(),
    };
    effective_rate.multiply(range.billable_nights())
}
