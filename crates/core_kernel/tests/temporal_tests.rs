//! Integration tests for due-date arithmetic and clocks

use chrono::NaiveDate;
use core_kernel::temporal::{due_date, Clock, FixedClock, SystemClock, TemporalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_term_of_seven_days() {
    assert_eq!(due_date(date(2024, 5, 10), 7).unwrap(), date(2024, 5, 17));
}

#[test]
fn month_boundary_example_from_requirements() {
    // 2024-01-30 + 5 days lands in February.
    assert_eq!(due_date(date(2024, 1, 30), 5).unwrap(), date(2024, 2, 4));
}

#[test]
fn long_terms_cross_years() {
    assert_eq!(due_date(date(2024, 12, 1), 90).unwrap(), date(2025, 3, 1));
}

#[test]
fn non_leap_february_rollover() {
    assert_eq!(due_date(date(2023, 2, 27), 2).unwrap(), date(2023, 3, 1));
}

#[test]
fn term_must_be_positive() {
    assert_eq!(
        due_date(date(2024, 1, 1), 0),
        Err(TemporalError::NonPositiveTerm(0))
    );
}

#[test]
fn system_clock_today_matches_now() {
    let clock = SystemClock;
    assert_eq!(clock.today(), clock.now().date_naive());
}

#[test]
fn fixed_clock_is_stable() {
    let clock = FixedClock::on(date(2024, 2, 29));
    assert_eq!(clock.today(), clock.today());
    assert_eq!(clock.today(), date(2024, 2, 29));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn due_date_is_exactly_term_days_later(
            ordinal in 0u32..36_500u32,
            term in 1u32..3_650u32
        ) {
            let base = date(2000, 1, 1) + chrono::Days::new(u64::from(ordinal));
            let due = due_date(base, term).unwrap();
            prop_assert_eq!((due - base).num_days(), i64::from(term));
        }
    }
}
