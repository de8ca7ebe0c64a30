//! Operation Lifecycle Engine
//!
//! Validates and executes state transitions (create → settle / create →
//! cancel) and derives due dates. Every mutation either fully succeeds or
//! leaves no trace: validation happens before any persistence attempt, and
//! the settle/cancel guard is a conditional update at the store boundary.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use core_kernel::{due_date, Amount, Clock, CompanyId, OperationId};

use crate::error::LedgerError;
use crate::operation::{NewOperation, Operation, OperationKind, OperationStatus};
use crate::ports::{LedgerStore, OperationFilter};

/// Default term when the caller does not supply one
pub const DEFAULT_TERM_DAYS: u32 = 7;

/// Request for recording a new operation
///
/// Optional fields fall back to their defaults: `term_days` to
/// [`DEFAULT_TERM_DAYS`], `operation_date` to the clock's today.
#[derive(Debug, Clone)]
pub struct CreateOperation {
    /// Purchase or sale
    pub kind: OperationKind,
    /// Counterparty; must reference an existing company
    pub company_id: CompanyId,
    /// Monetary value; must be strictly positive
    pub amount: Decimal,
    /// Days until due; must be at least 1
    pub term_days: Option<u32>,
    /// Optional free-text description
    pub description: Option<String>,
    /// Calendar date of the operation
    pub operation_date: Option<NaiveDate>,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl CreateOperation {
    /// Starts a request with the required fields
    pub fn new(kind: OperationKind, company_id: CompanyId, amount: Decimal) -> Self {
        Self {
            kind,
            company_id,
            amount,
            term_days: None,
            description: None,
            operation_date: None,
            notes: None,
        }
    }

    /// Sets the term in days
    pub fn with_term_days(mut self, term_days: u32) -> Self {
        self.term_days = Some(term_days);
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the operation date
    pub fn on_date(mut self, operation_date: NaiveDate) -> Self {
        self.operation_date = Some(operation_date);
        self
    }

    /// Sets the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// The operation lifecycle service
///
/// Holds explicit handles to its collaborators — the store port and the
/// clock — rather than reaching for ambient globals.
#[derive(Clone)]
pub struct OperationService {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl OperationService {
    /// Creates the service over a store and a clock
    pub fn new(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records a new operation and returns the persisted record
    ///
    /// The due date is `operation_date + term_days` calendar days, computed
    /// here once and never recomputed. The operation starts in `Open` with
    /// no settlement date.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if the amount is not strictly positive
    /// - [`LedgerError::InvalidTerm`] if the term is zero
    /// - [`LedgerError::CompanyNotFound`] if the company id is unknown
    ///
    /// All validation precedes persistence; on any error no row exists.
    pub async fn create(&self, request: CreateOperation) -> Result<Operation, LedgerError> {
        let amount = Amount::new(request.amount)?;
        let term_days = request.term_days.unwrap_or(DEFAULT_TERM_DAYS);
        let operation_date = request
            .operation_date
            .unwrap_or_else(|| self.clock.today());
        let due = due_date(operation_date, term_days)?;

        let draft = NewOperation {
            kind: request.kind,
            company_id: request.company_id,
            description: request.description,
            amount,
            term_days,
            operation_date,
            due_date: due,
            notes: request.notes,
        };

        let id = self
            .store
            .insert_operation(&draft)
            .await
            .map_err(|e| match e {
                e if e.is_not_found() => LedgerError::CompanyNotFound(request.company_id),
                e => LedgerError::Store(e),
            })?;

        info!(%id, kind = %draft.kind, company = %draft.company_id, %due, "operation recorded");

        self.store
            .get_operation(id)
            .await?
            .ok_or_else(|| LedgerError::Store(core_kernel::StoreError::not_found("Operation", id)))
    }

    /// Settles an open operation on the given date (default: today)
    ///
    /// Returns `Ok(true)` exactly once per operation. A missing operation or
    /// one already settled/canceled yields `Ok(false)` with nothing mutated —
    /// the guard is the store's conditional update, not a read-then-write.
    pub async fn settle(
        &self,
        id: OperationId,
        settlement_date: Option<NaiveDate>,
    ) -> Result<bool, LedgerError> {
        let settlement_date = settlement_date.unwrap_or_else(|| self.clock.today());

        let affected = self
            .store
            .update_operation_status(
                id,
                OperationStatus::Open,
                OperationStatus::Settled,
                Some(settlement_date),
            )
            .await?;

        if affected > 0 {
            info!(%id, %settlement_date, "operation settled");
        } else {
            debug!(%id, "settle refused: operation missing or not open");
        }
        Ok(affected > 0)
    }

    /// Cancels an open operation
    ///
    /// Same single-shot semantics as [`settle`](Self::settle); the
    /// settlement date stays null.
    pub async fn cancel(&self, id: OperationId) -> Result<bool, LedgerError> {
        let affected = self
            .store
            .update_operation_status(id, OperationStatus::Open, OperationStatus::Canceled, None)
            .await?;

        if affected > 0 {
            info!(%id, "operation canceled");
        } else {
            debug!(%id, "cancel refused: operation missing or not open");
        }
        Ok(affected > 0)
    }

    /// Retrieves one operation, if it exists
    pub async fn get(&self, id: OperationId) -> Result<Option<Operation>, LedgerError> {
        Ok(self.store.get_operation(id).await?)
    }

    /// Lists operations matching the filter, due_date ascending
    pub async fn list(&self, filter: OperationFilter) -> Result<Vec<Operation>, LedgerError> {
        Ok(self.store.list_operations(&filter).await?)
    }
}
