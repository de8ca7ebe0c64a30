//! Ledger domain errors

use core_kernel::{CompanyId, MoneyError, StoreError, TemporalError};
use thiserror::Error;

/// Errors that can occur in the ledger domain
///
/// Validation failures are detected before any persistence attempt; store
/// failures are wrapped so callers see one error type per service call.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Operation amount was zero or negative
    #[error(transparent)]
    InvalidAmount(#[from] MoneyError),

    /// Term or date arithmetic was invalid
    #[error(transparent)]
    InvalidTerm(#[from] TemporalError),

    /// Company name was empty after trimming
    #[error("Company name must not be empty")]
    EmptyCompanyName,

    /// Referenced company does not exist
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    /// A company with the same canonical name is already registered
    #[error("Company already registered: {0}")]
    DuplicateCompanyName(String),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns true if this error indicates a missing referenced entity
    pub fn is_not_found(&self) -> bool {
        match self {
            LedgerError::CompanyNotFound(_) => true,
            LedgerError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this error indicates a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        match self {
            LedgerError::DuplicateCompanyName(_) => true,
            LedgerError::Store(e) => e.is_conflict(),
            _ => false,
        }
    }
}
