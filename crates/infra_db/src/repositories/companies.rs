//! Company repository implementation
//!
//! Database access for counterparty companies. Rows come back as
//! statically-typed records; no dynamic field access leaves this layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for a company
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Repository for managing company records
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a company and returns its generated id
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` when the name is taken.
    pub async fn insert(&self, name: &str, tax_id: Option<&str>) -> Result<Uuid, DatabaseError> {
        let id = Uuid::now_v7();

        sqlx::query("INSERT INTO companies (id, name, tax_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(tax_id)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    /// Retrieves a company by id
    pub async fn get(&self, id: Uuid) -> Result<Option<CompanyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, tax_id, active, created_at FROM companies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists companies ordered by name
    pub async fn list(&self, active_only: bool) -> Result<Vec<CompanyRow>, DatabaseError> {
        let query = if active_only {
            "SELECT id, name, tax_id, active, created_at FROM companies \
             WHERE active ORDER BY name"
        } else {
            "SELECT id, name, tax_id, active, created_at FROM companies ORDER BY name"
        };

        let rows = sqlx::query_as::<_, CompanyRow>(query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Flags a company inactive, returning the affected row count (0 or 1)
    ///
    /// The row is never removed; operations keep their reference.
    pub async fn deactivate(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE companies SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
