//! Property-based test generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Amount;
use domain_ledger::{OperationKind, OperationStatus};

/// Strategy for strictly-positive amounts in minor units (cents)
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for valid [`Amount`] values
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    amount_minor_strategy().prop_map(|minor| {
        Amount::new(Decimal::new(minor, 2)).expect("positive minor units are valid")
    })
}

/// Strategy for valid terms in days
pub fn term_days_strategy() -> impl Strategy<Value = u32> {
    1u32..365u32
}

/// Strategy for operation dates spanning several years
pub fn operation_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_650u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .expect("valid date")
            .checked_add_days(Days::new(offset))
            .expect("offset stays in range")
    })
}

/// Strategy over both operation kinds
pub fn kind_strategy() -> impl Strategy<Value = OperationKind> {
    prop_oneof![Just(OperationKind::Purchase), Just(OperationKind::Sale)]
}

/// Strategy over all operation statuses
pub fn status_strategy() -> impl Strategy<Value = OperationStatus> {
    prop_oneof![
        Just(OperationStatus::Open),
        Just(OperationStatus::Settled),
        Just(OperationStatus::Canceled),
    ]
}
