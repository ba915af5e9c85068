//! Wire representations shared by several endpoint modules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Money};

/// Monetary amount on the wire.
///
/// The amount travels as a JSON string to keep exact decimal semantics
/// end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyDto {
    /// Decimal amount, e.g. `"240.00"`.
    pub amount: Decimal,
    /// ISO 4217 currency code, e.g. `"EUR"`.
    pub currency: String,
}

impl From<&Money> for MoneyDto {
    fn from(value: &Money) -> Self {
        Self {
            amount: value.amount(),
            currency: value.currency().as_str().to_owned(),
        }
    }
}

impl TryFrom<MoneyDto> for Money {
    type Error = Error;

    fn try_from(value: MoneyDto) -> Result<Self, Self::Error> {
        let currency = crate::domain::CurrencyCode::try_new(value.currency)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Self::try_new(value.amount, currency)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}
