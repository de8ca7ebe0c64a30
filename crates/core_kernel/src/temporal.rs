//! Calendar-day arithmetic and clock abstraction
//!
//! Due dates are derived from plain calendar days — never business days —
//! and "today" is always an explicit input so that date-sensitive logic is
//! deterministic under test. Nothing in the engines reads the system clock
//! directly; they go through the [`Clock`] trait.

use chrono::{DateTime, Days, NaiveDate, Utc};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Term must be at least one day, got {0}")]
    NonPositiveTerm(u32),

    #[error("Date out of range: {base} + {days} days")]
    DateOutOfRange { base: NaiveDate, days: u32 },
}

/// Derives a due date from an operation date and a term in calendar days
///
/// The result is exactly `operation_date + term_days`, carrying across month
/// and year boundaries (2024-01-30 + 5 days = 2024-02-04). The term must be
/// at least one day.
pub fn due_date(operation_date: NaiveDate, term_days: u32) -> Result<NaiveDate, TemporalError> {
    if term_days == 0 {
        return Err(TemporalError::NonPositiveTerm(term_days));
    }

    operation_date
        .checked_add_days(Days::new(u64::from(term_days)))
        .ok_or(TemporalError::DateOutOfRange {
            base: operation_date,
            days: term_days,
        })
}

/// Source of the current date and time
///
/// Engines receive a clock handle instead of calling `Utc::now()` so tests
/// can pin "today" without patching time.
pub trait Clock: Send + Sync {
    /// The current calendar date
    fn today(&self) -> NaiveDate;

    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed date, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    /// Creates a clock pinned to the given date
    pub fn on(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now(&self) -> DateTime<Utc> {
        self.date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_date_within_month() {
        assert_eq!(due_date(date(2024, 3, 1), 7).unwrap(), date(2024, 3, 8));
    }

    #[test]
    fn test_due_date_crosses_month_boundary() {
        assert_eq!(due_date(date(2024, 1, 30), 5).unwrap(), date(2024, 2, 4));
    }

    #[test]
    fn test_due_date_crosses_year_boundary() {
        assert_eq!(due_date(date(2023, 12, 28), 7).unwrap(), date(2024, 1, 4));
    }

    #[test]
    fn test_due_date_leap_day() {
        assert_eq!(due_date(date(2024, 2, 28), 1).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_zero_term_rejected() {
        assert_eq!(
            due_date(date(2024, 1, 1), 0),
            Err(TemporalError::NonPositiveTerm(0))
        );
    }

    #[test]
    fn test_fixed_clock_pins_today() {
        let clock = FixedClock::on(date(2024, 6, 15));
        assert_eq!(clock.today(), date(2024, 6, 15));
        assert_eq!(clock.now().date_naive(), date(2024, 6, 15));
    }
}
