//! Operation repository implementation
//!
//! Database access for purchase/sale operations. Every read joins the
//! owning company's display name; the status update is a single conditional
//! statement whose row count implements the state-machine guard.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for an operation, joined with the company name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OperationRow {
    pub id: Uuid,
    pub kind: String,
    pub company_id: Uuid,
    pub description: Option<String>,
    pub amount: Decimal,
    pub term_days: i32,
    pub operation_date: NaiveDate,
    pub due_date: NaiveDate,
    pub settlement_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub company_name: String,
}

/// Column list shared by every operation read
const SELECT_OPERATION: &str = "SELECT o.id, o.kind, o.company_id, o.description, o.amount, \
     o.term_days, o.operation_date, o.due_date, o.settlement_date, o.status, \
     o.notes, o.created_at, c.name AS company_name \
     FROM operations o JOIN companies c ON c.id = o.company_id";

/// Insert payload for a new operation row
#[derive(Debug, Clone)]
pub struct NewOperationRow {
    pub kind: String,
    pub company_id: Uuid,
    pub description: Option<String>,
    pub amount: Decimal,
    pub term_days: i32,
    pub operation_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

/// Optional AND-combined filters for listing operations
#[derive(Debug, Clone, Default)]
pub struct OperationRowFilter {
    pub status: Option<String>,
    pub kind: Option<String>,
    pub company_id: Option<Uuid>,
}

/// Repository for managing operation records
#[derive(Debug, Clone)]
pub struct OperationRepository {
    pool: PgPool,
}

impl OperationRepository {
    /// Creates a new OperationRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an operation and returns its generated id
    ///
    /// New rows always start OPEN with a null settlement date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ForeignKeyViolation` when the company id is
    /// unknown; nothing is persisted in that case.
    pub async fn insert(&self, operation: &NewOperationRow) -> Result<Uuid, DatabaseError> {
        let id = Uuid::now_v7();

        sqlx::query(
            "INSERT INTO operations \
             (id, kind, company_id, description, amount, term_days, \
              operation_date, due_date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(id)
        .bind(&operation.kind)
        .bind(operation.company_id)
        .bind(&operation.description)
        .bind(operation.amount)
        .bind(operation.term_days)
        .bind(operation.operation_date)
        .bind(operation.due_date)
        .bind(&operation.notes)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Retrieves an operation by id, joined with its company name
    pub async fn get(&self, id: Uuid) -> Result<Option<OperationRow>, DatabaseError> {
        let row = sqlx::query_as::<_, OperationRow>(&format!("{SELECT_OPERATION} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Lists operations matching the filter
    ///
    /// Ordered by due date ascending with ties broken by id, so the result
    /// is deterministic for any insertion order.
    pub async fn list(
        &self,
        filter: &OperationRowFilter,
    ) -> Result<Vec<OperationRow>, DatabaseError> {
        let mut query = QueryBuilder::new(SELECT_OPERATION);
        query.push(" WHERE TRUE");

        if let Some(status) = &filter.status {
            query.push(" AND o.status = ").push_bind(status.as_str());
        }
        if let Some(kind) = &filter.kind {
            query.push(" AND o.kind = ").push_bind(kind.as_str());
        }
        if let Some(company_id) = filter.company_id {
            query.push(" AND o.company_id = ").push_bind(company_id);
        }
        query.push(" ORDER BY o.due_date, o.id");

        let rows = query
            .build_query_as::<OperationRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Conditionally updates an operation's status
    ///
    /// The WHERE clause checks the expected current status, so the check and
    /// the write are one atomic statement; a concurrent caller that lost the
    /// race sees 0 affected rows.
    pub async fn update_status(
        &self,
        id: Uuid,
        expected_current: &str,
        new_status: &str,
        settlement_date: Option<NaiveDate>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE operations SET status = $1, settlement_date = $2 \
             WHERE id = $3 AND status = $4",
        )
        .bind(new_status)
        .bind(settlement_date)
        .bind(id)
        .bind(expected_current)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
