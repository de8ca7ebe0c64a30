//! Financial Rollup Engine
//!
//! Derives aggregate exposure — payables, receivables, projected balance,
//! overdue figures — from the current operation set. The engine holds no
//! state of its own: every report is a pure function of the store's contents
//! and a caller-supplied reference date. It only ever reads through the
//! port; mutation belongs to the lifecycle engine.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerError;
use crate::operation::{Operation, OperationKind, OperationStatus};
use crate::ports::{LedgerStore, OperationFilter};

/// Aggregate financial position as of a reference date
///
/// Totals cover open operations only; settled and canceled obligations are
/// excluded. All figures are exact decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of open purchase amounts (future cash outflow)
    pub total_payable: Decimal,
    /// Sum of open sale amounts (future cash inflow)
    pub total_receivable: Decimal,
    /// `total_receivable - total_payable`; may be negative
    pub projected_balance: Decimal,
    /// Open operations strictly past their due date
    pub overdue_count: u64,
    /// Sum of amounts over those overdue operations
    pub overdue_amount: Decimal,
}

/// The financial rollup service
#[derive(Clone)]
pub struct RollupService {
    store: Arc<dyn LedgerStore>,
}

impl RollupService {
    /// Creates the service over a store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Accounts payable: purchase operations, due_date ascending
    ///
    /// With `open_only` (the default reporting view) only outstanding
    /// obligations are returned; otherwise settled and canceled purchases
    /// appear too.
    pub async fn payables(&self, open_only: bool) -> Result<Vec<Operation>, LedgerError> {
        self.by_kind(OperationKind::Purchase, open_only).await
    }

    /// Accounts receivable: sale operations, due_date ascending
    pub async fn receivables(&self, open_only: bool) -> Result<Vec<Operation>, LedgerError> {
        self.by_kind(OperationKind::Sale, open_only).await
    }

    /// Open operations of any kind strictly past their due date
    ///
    /// An operation due exactly on `today` is not overdue.
    pub async fn overdue(&self, today: NaiveDate) -> Result<Vec<Operation>, LedgerError> {
        let open = self
            .store
            .list_operations(&OperationFilter::all().with_status(OperationStatus::Open))
            .await?;

        Ok(open.into_iter().filter(|op| op.is_overdue(today)).collect())
    }

    /// Aggregate position as of `today`
    pub async fn summary(&self, today: NaiveDate) -> Result<FinancialSummary, LedgerError> {
        let open = self
            .store
            .list_operations(&OperationFilter::all().with_status(OperationStatus::Open))
            .await?;

        let mut summary = FinancialSummary {
            total_payable: Decimal::ZERO,
            total_receivable: Decimal::ZERO,
            projected_balance: Decimal::ZERO,
            overdue_count: 0,
            overdue_amount: Decimal::ZERO,
        };

        for operation in &open {
            let value = operation.amount.value();
            match operation.kind {
                OperationKind::Purchase => summary.total_payable += value,
                OperationKind::Sale => summary.total_receivable += value,
            }
            if operation.is_overdue(today) {
                summary.overdue_count += 1;
                summary.overdue_amount += value;
            }
        }
        summary.projected_balance = summary.total_receivable - summary.total_payable;

        debug!(
            %today,
            open = open.len(),
            overdue = summary.overdue_count,
            "financial summary computed"
        );
        Ok(summary)
    }

    async fn by_kind(
        &self,
        kind: OperationKind,
        open_only: bool,
    ) -> Result<Vec<Operation>, LedgerError> {
        let mut filter = OperationFilter::all().with_kind(kind);
        if open_only {
            filter = filter.with_status(OperationStatus::Open);
        }
        Ok(self.store.list_operations(&filter).await?)
    }
}
