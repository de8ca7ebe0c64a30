//! Monetary amounts with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values using
//! rust_decimal for precise calculations without floating-point errors. The
//! ledger is single-currency, so an amount is just an exact decimal that is
//! guaranteed strictly positive at construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount must be strictly positive, got {0}")]
    NotPositive(Decimal),
}

/// A strictly-positive monetary amount
///
/// Amounts use rust_decimal for exact arithmetic; aggregating many small
/// operations never loses cents. The constructor rejects zero and negative
/// values, so a stored `Amount` always satisfies the `amount > 0` invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount, rejecting zero and negative values
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value <= Decimal::ZERO {
            return Err(MoneyError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Creates an amount from an integer number of minor units (cents)
    pub fn from_minor(minor_units: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(minor_units, 2))
    }

    /// Returns the decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to two decimal places using banker's rounding
    pub fn round_cents(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointNearestEven)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Sums amounts exactly, returning zero for an empty sequence
pub fn total<'a, I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a Amount>,
{
    amounts.into_iter().map(|a| a.0).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_creation() {
        let a = Amount::new(dec!(100.50)).unwrap();
        assert_eq!(a.value(), dec!(100.50));
    }

    #[test]
    fn test_amount_rejects_zero() {
        assert_eq!(
            Amount::new(Decimal::ZERO),
            Err(MoneyError::NotPositive(Decimal::ZERO))
        );
    }

    #[test]
    fn test_amount_rejects_negative() {
        assert!(Amount::new(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_amount_from_minor() {
        let a = Amount::from_minor(10050).unwrap();
        assert_eq!(a.value(), dec!(100.50));
    }

    #[test]
    fn test_total_is_exact() {
        let amounts: Vec<Amount> = (0..1000)
            .map(|_| Amount::new(dec!(0.01)).unwrap())
            .collect();
        assert_eq!(total(&amounts), dec!(10.00));
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_serde_rejects_non_positive() {
        let ok: Result<Amount, _> = serde_json::from_str("\"10.00\"");
        assert!(ok.is_ok());

        let bad: Result<Amount, _> = serde_json::from_str("\"-1\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_display_two_decimal_places() {
        let a = Amount::new(dec!(7)).unwrap();
        assert_eq!(a.to_string(), "7.00");
    }
}
