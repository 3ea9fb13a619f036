//! Fixed-point prices.
//!
//! Prices are `rust_decimal::Decimal` values with exactly two fraction
//! digits, matching the `NUMERIC(10,2)` columns they are stored in. They
//! travel over JSON as strings ("4.50") so no client ever sees a float.

use super::InvalidInput;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Fraction digits kept for every price.
const DECIMAL_PLACES: u32 = 2;

/// Largest value a `NUMERIC(10,2)` column holds: 99 999 999.99.
fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, DECIMAL_PLACES)
}

/// A non-negative monetary amount with two fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

/// A price as it arrives in a request body: either a JSON number (`4.5`)
/// or a numeric string (`"4.50"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl Price {
    /// Checks the sign, rounds `value` to cents (half away from zero) and
    /// checks the upper bound.
    pub fn new(value: Decimal) -> Result<Self, InvalidInput> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(InvalidInput(format!("price must be non-negative, got {value}")));
        }
        let mut amount =
            value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        if amount > max_price() {
            return Err(InvalidInput(format!(
                "price exceeds maximum allowed ({}), got {value}",
                max_price()
            )));
        }
        // "-0" parses as a negative zero
        amount.set_sign_positive(true);
        amount.rescale(DECIMAL_PLACES);
        Ok(Self(amount))
    }

    /// Parses a request value. Missing, non-numeric and negative input is
    /// rejected.
    pub fn parse(input: Option<&PriceInput>) -> Result<Self, InvalidInput> {
        let raw = match input {
            None => return Err(InvalidInput::new("price is required")),
            Some(PriceInput::Number(n)) => n.to_string(),
            Some(PriceInput::Text(s)) => s.trim().to_string(),
        };
        let value = Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|_| InvalidInput(format!("price must be a number, got {raw:?}")))?;
        Self::new(value)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}
