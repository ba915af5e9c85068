//! Monetary value types.
//!
//! [`Money`] is an immutable amount paired with a currency. Arithmetic never
//! crosses currencies and never produces a negative amount; both failure
//! modes surface as [`MoneyError`] instead of being silently coerced.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised by monetary constructors and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// Amounts are non-negative by construction.
    #[error("monetary amounts cannot be negative: {amount}")]
    NegativeAmount {
        /// The offending amount.
        amount: Decimal,
    },
    /// Arithmetic and comparisons require matching currencies.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency on the left-hand side of the operation.
        left: CurrencyCode,
        /// Currency on the right-hand side of the operation.
        right: CurrencyCode,
    },
    /// Currency codes are three uppercase ASCII letters.
    #[error("invalid currency code: {code:?}")]
    InvalidCurrencyCode {
        /// The rejected input.
        code: String,
    },
}

/// ISO-4217-style currency code: three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validates and wraps a currency code.
    pub fn try_new(code: impl Into<String>) -> Result<Self, MoneyError> {
        let code = code.into();
        let valid = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
        if valid {
            Ok(Self(code))
        } else {
            Err(MoneyError::InvalidCurrencyCode { code })
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// A discount expressed as a whole percentage between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiscountPercent(u8);

/// Error raised when a discount percentage is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("discount must be between 0 and 100, got {value}")]
pub struct InvalidDiscount {
    /// The rejected percentage.
    pub value: u8,
}

impl DiscountPercent {
    /// Validates and wraps a percentage.
    pub const fn try_new(value: u8) -> Result<Self, InvalidDiscount> {
        if value <= 100 {
            Ok(Self(value))
        } else {
            Err(InvalidDiscount { value })
        }
    }

    /// Returns the percentage as an integer.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DiscountPercent {
    type Error = InvalidDiscount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DiscountPercent> for u8 {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}

/// An immutable, non-negative amount of a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

impl Money {
    /// Creates a monetary value, rejecting negative amounts.
    pub fn try_new(amount: Decimal, currency: CurrencyCode) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::NegativeAmount { amount });
        }
        Ok(Self { amount, currency })
    }

    /// A zero amount in the given currency.
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns the numeric amount.
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    fn require_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            })
        }
    }

    /// Adds another amount of the same currency.
    pub fn add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency.clone(),
        })
    }

    /// Subtracts another amount of the same currency.
    ///
    /// Fails with [`MoneyError::NegativeAmount`] when the result would drop
    /// below zero.
    pub fn subtract(&self, other: &Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        let amount = self.amount - other.amount;
        if amount < Decimal::ZERO {
            return Err(MoneyError::NegativeAmount { amount });
        }
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Returns whether this amount covers `other` (same currency only).
    pub fn covers(&self, other: &Self) -> Result<bool, MoneyError> {
        self.require_same_currency(other)?;
        Ok(self.amount >= other.amount)
    }

    /// Multiplies the amount by a whole number of units (e.g. nights).
    pub fn multiply(&self, units: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(units),
            currency: self.currency.clone(),
        }
    }

    /// Reduces the amount by a whole-percentage discount.
    pub fn with_discount(&self, discount: DiscountPercent) -> Self {
        let rebate = self.amount * Decimal::from(discount.value()) / Decimal::ONE_HUNDRED;
        Self {
            amount: self.amount - rebate,
            currency: self.currency.clone(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn eur(amount: Decimal) -> Money {
        Money::try_new(amount, CurrencyCode::try_new("EUR").expect("valid code"))
            .expect("non-negative amount")
    }

    fn usd(amount: Decimal) -> Money {
        Money::try_new(amount, CurrencyCode::try_new("USD").expect("valid code"))
            .expect("non-negative amount")
    }

    #[rstest]
    #[case("eur")]
    #[case("EU")]
    #[case("EURO")]
    #[case("E1R")]
    #[case("")]
    fn rejects_malformed_currency_codes(#[case] code: &str) {
        assert!(matches!(
            CurrencyCode::try_new(code),
            Err(MoneyError::InvalidCurrencyCode { .. })
        ));
    }

    #[test]
    fn rejects_negative_construction() {
        let currency = CurrencyCode::try_new("EUR").expect("valid code");
        let err = Money::try_new(dec!(-1), currency).expect_err("negative amount");
        assert!(matches!(err, MoneyError::NegativeAmount { .. }));
    }

    #[test]
    fn adds_and_subtracts_same_currency() {
        let total = eur(dec!(10)).add(&eur(dec!(2.50))).expect("same currency");
        assert_eq!(total.amount(), dec!(12.50));

        let rest = total.subtract(&eur(dec!(12))).expect("same currency");
        assert_eq!(rest.amount(), dec!(0.50));
    }

    #[test]
    fn subtraction_below_zero_fails() {
        let err = eur(dec!(5)).subtract(&eur(dec!(6))).expect_err("underflow");
        assert!(matches!(err, MoneyError::NegativeAmount { .. }));
    }

    #[test]
    fn cross_currency_operations_fail() {
        let err = eur(dec!(5)).add(&usd(dec!(5))).expect_err("mismatch");
        assert!(matches!(err, MoneyError::CurrencyMismatch { .. }));

        let err = eur(dec!(5)).covers(&usd(dec!(1))).expect_err("mismatch");
        assert!(matches!(err, MoneyError::CurrencyMismatch { .. }));
    }

    #[rstest]
    #[case(dec!(100), 20, dec!(80))]
    #[case(dec!(100), 0, dec!(100))]
    #[case(dec!(100), 100, dec!(0))]
    #[case(dec!(99.90), 10, dec!(89.910))]
    fn applies_whole_percentage_discounts(
        #[case] amount: Decimal,
        #[case] percent: u8,
        #[case] expected: Decimal,
    ) {
        let discount = DiscountPercent::try_new(percent).expect("valid discount");
        assert_eq!(eur(amount).with_discount(discount).amount(), expected);
    }

    #[test]
    fn rejects_discount_above_hundred() {
        assert!(DiscountPercent::try_new(101).is_err());
    }

    #[test]
    fn multiplies_by_unit_count() {
        assert_eq!(eur(dec!(80)).multiply(3).amount(), dec!(240));
    }

    #[test]
    fn display_includes_currency() {
        assert_eq!(eur(dec!(20)).to_string(), "20 EUR");
    }
}
