//! Purchase/sale operations
//!
//! An operation is a single monetary obligation against a company: a
//! purchase (future cash outflow, accounts payable) or a sale (future cash
//! inflow, accounts receivable). Its status follows a closed state machine:
//!
//! ```text
//!         create
//!  (none) ------> Open --settle(date)--> Settled   [terminal]
//!                  |
//!                  +---cancel()--------> Canceled  [terminal]
//! ```
//!
//! No transition exists out of a terminal state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Amount, CompanyId, OperationId};

/// Kind of obligation. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    /// Future cash outflow (accounts payable)
    Purchase,
    /// Future cash inflow (accounts receivable)
    Sale,
}

impl OperationKind {
    /// Canonical wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Purchase => "PURCHASE",
            OperationKind::Sale => "SALE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASE" => Ok(OperationKind::Purchase),
            "SALE" => Ok(OperationKind::Sale),
            other => Err(format!("unknown operation kind: {other}")),
        }
    }
}

/// Operation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// Obligation is outstanding
    Open,
    /// Financially resolved on a settlement date
    Settled,
    /// Voided without settlement
    Canceled,
}

impl OperationStatus {
    /// Canonical wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Open => "OPEN",
            OperationStatus::Settled => "SETTLED",
            OperationStatus::Canceled => "CANCELED",
        }
    }

    /// Settled and Canceled accept no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OperationStatus::Open)
    }

    /// Checks whether a transition is permitted by the state machine
    pub fn can_transition_to(&self, target: OperationStatus) -> bool {
        use OperationStatus::*;
        matches!((self, target), (Open, Settled) | (Open, Canceled))
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(OperationStatus::Open),
            "SETTLED" => Ok(OperationStatus::Settled),
            "CANCELED" => Ok(OperationStatus::Canceled),
            other => Err(format!("unknown operation status: {other}")),
        }
    }
}

/// A persisted operation, joined with its company's display name at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier, assigned by the store on creation
    pub id: OperationId,
    /// Purchase or sale
    pub kind: OperationKind,
    /// Owning company
    pub company_id: CompanyId,
    /// Company display name, resolved at read time (not stored on the row)
    pub company_name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Strictly-positive monetary value
    pub amount: Amount,
    /// Days between operation date and due date
    pub term_days: u32,
    /// Calendar date the operation was recorded
    pub operation_date: NaiveDate,
    /// `operation_date + term_days` days; computed once, never recomputed
    pub due_date: NaiveDate,
    /// Set iff status is Settled
    pub settlement_date: Option<NaiveDate>,
    /// Current state-machine position
    pub status: OperationStatus,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// True for an open operation strictly past its due date
    ///
    /// An operation due today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == OperationStatus::Open && self.due_date < today
    }
}

/// A validated operation ready for insertion
///
/// Construction happens in the lifecycle engine after amount/term/date
/// validation; the store receives only well-formed drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOperation {
    pub kind: OperationKind,
    pub company_id: CompanyId,
    pub description: Option<String>,
    pub amount: Amount,
    pub term_days: u32,
    pub operation_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_transitions() {
        use OperationStatus::*;

        assert!(Open.can_transition_to(Settled));
        assert!(Open.can_transition_to(Canceled));

        for terminal in [Settled, Canceled] {
            assert!(terminal.is_terminal());
            for target in [Open, Settled, Canceled] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_open_is_not_terminal() {
        assert!(!OperationStatus::Open.is_terminal());
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [OperationKind::Purchase, OperationKind::Sale] {
            assert_eq!(kind.as_str().parse::<OperationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            OperationStatus::Open,
            OperationStatus::Settled,
            OperationStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<OperationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_strings_rejected() {
        assert!("purchase".parse::<OperationKind>().is_err());
        assert!("open".parse::<OperationStatus>().is_err());
        assert!("".parse::<OperationKind>().is_err());
    }
}
