//! PostgreSQL Ledger Store Adapter
//!
//! Implements the domain's [`LedgerStore`] port over the repositories,
//! translating row types into domain records at the boundary and database
//! errors into store errors.
//!
//! # Error Translation
//!
//! - `DatabaseError::DuplicateEntry` -> `StoreError::Conflict` (company name)
//! - `DatabaseError::ForeignKeyViolation` -> `StoreError::NotFound` (company)
//! - Connection problems -> `StoreError::Connection`
//! - Everything else -> `StoreError::Internal`

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use core_kernel::{Amount, CompanyId, DomainPort, OperationId, StoreError};
use domain_ledger::{
    Company, LedgerStore, NewCompany, NewOperation, Operation, OperationFilter, OperationStatus,
};

use crate::error::DatabaseError;
use crate::repositories::{
    CompanyRepository, CompanyRow, NewOperationRow, OperationRepository, OperationRow,
    OperationRowFilter,
};

/// PostgreSQL-backed implementation of the ledger store port
#[derive(Debug, Clone)]
pub struct PostgresLedgerStore {
    companies: CompanyRepository,
    operations: OperationRepository,
}

impl PostgresLedgerStore {
    /// Creates a new store adapter over a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            operations: OperationRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresLedgerStore {}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn insert_company(&self, company: &NewCompany) -> Result<CompanyId, StoreError> {
        let id = self
            .companies
            .insert(company.name(), company.tax_id())
            .await
            .map_err(|e| match e {
                e if e.is_duplicate() => {
                    StoreError::conflict(format!("company name '{}' already registered", company.name()))
                }
                e => store_error(e),
            })?;

        Ok(CompanyId::from(id))
    }

    async fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        let row = self.companies.get(id.into()).await.map_err(store_error)?;
        Ok(row.map(company_from_row))
    }

    async fn list_companies(&self, active_only: bool) -> Result<Vec<Company>, StoreError> {
        let rows = self
            .companies
            .list(active_only)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(company_from_row).collect())
    }

    async fn deactivate_company(&self, id: CompanyId) -> Result<u64, StoreError> {
        self.companies
            .deactivate(id.into())
            .await
            .map_err(store_error)
    }

    async fn insert_operation(&self, operation: &NewOperation) -> Result<OperationId, StoreError> {
        let row = NewOperationRow {
            kind: operation.kind.as_str().to_string(),
            company_id: operation.company_id.into(),
            description: operation.description.clone(),
            amount: operation.amount.value(),
            term_days: operation.term_days as i32,
            operation_date: operation.operation_date,
            due_date: operation.due_date,
            notes: operation.notes.clone(),
        };

        let id = self.operations.insert(&row).await.map_err(|e| match e {
            e if e.is_foreign_key_violation() => {
                StoreError::not_found("Company", operation.company_id)
            }
            e => store_error(e),
        })?;

        debug!(%id, "operation row inserted");
        Ok(OperationId::from(id))
    }

    async fn get_operation(&self, id: OperationId) -> Result<Option<Operation>, StoreError> {
        let row = self.operations.get(id.into()).await.map_err(store_error)?;
        row.map(operation_from_row).transpose()
    }

    async fn list_operations(&self, filter: &OperationFilter) -> Result<Vec<Operation>, StoreError> {
        let row_filter = OperationRowFilter {
            status: filter.status.map(|s| s.as_str().to_string()),
            kind: filter.kind.map(|k| k.as_str().to_string()),
            company_id: filter.company_id.map(Into::into),
        };

        let rows = self
            .operations
            .list(&row_filter)
            .await
            .map_err(store_error)?;
        rows.into_iter().map(operation_from_row).collect()
    }

    async fn update_operation_status(
        &self,
        id: OperationId,
        expected_current: OperationStatus,
        new_status: OperationStatus,
        settlement_date: Option<NaiveDate>,
    ) -> Result<u64, StoreError> {
        self.operations
            .update_status(
                id.into(),
                expected_current.as_str(),
                new_status.as_str(),
                settlement_date,
            )
            .await
            .map_err(store_error)
    }
}

fn company_from_row(row: CompanyRow) -> Company {
    Company {
        id: CompanyId::from(row.id),
        name: row.name,
        tax_id: row.tax_id,
        active: row.active,
        created_at: row.created_at,
    }
}

/// Builds the statically-typed domain record from a row
///
/// The CHECK constraints make undecodable rows unreachable in practice;
/// if one ever appears it surfaces as `StoreError::Corrupt` rather than a
/// panic.
fn operation_from_row(row: OperationRow) -> Result<Operation, StoreError> {
    let kind = row
        .kind
        .parse()
        .map_err(|e: String| StoreError::corrupt(e))?;
    let status = row
        .status
        .parse()
        .map_err(|e: String| StoreError::corrupt(e))?;
    let amount = Amount::new(row.amount)
        .map_err(|e| StoreError::corrupt(format!("operation {}: {e}", row.id)))?;
    let term_days = u32::try_from(row.term_days)
        .map_err(|_| StoreError::corrupt(format!("operation {}: negative term", row.id)))?;

    Ok(Operation {
        id: OperationId::from(row.id),
        kind,
        company_id: CompanyId::from(row.company_id),
        company_name: row.company_name,
        description: row.description,
        amount,
        term_days,
        operation_date: row.operation_date,
        due_date: row.due_date,
        settlement_date: row.settlement_date,
        status,
        notes: row.notes,
        created_at: row.created_at,
    })
}

fn store_error(error: DatabaseError) -> StoreError {
    match error {
        DatabaseError::NotFound(message) => StoreError::NotFound {
            entity_type: "Record".to_string(),
            id: message,
        },
        DatabaseError::DuplicateEntry(message) => StoreError::conflict(message),
        DatabaseError::ConnectionFailed(message) => StoreError::connection(message),
        DatabaseError::PoolExhausted => StoreError::connection("connection pool exhausted"),
        other => StoreError::internal(other.to_string()),
    }
}
