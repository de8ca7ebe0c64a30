//! Ledger Store Port
//!
//! This module defines the storage contract consumed by the lifecycle and
//! rollup engines. Adapters implement [`LedgerStore`]:
//!
//! - **Postgres adapter** (infra_db): production persistence
//! - **In-memory store** (the `mock` module): deterministic tests
//!
//! Two guarantees sit at this boundary rather than in the engines:
//!
//! - `update_operation_status` is an atomic compare-and-set: the write
//!   happens only if the current status still equals the expected one.
//!   This is what makes a double-settle or settle-after-cancel race lose
//!   cleanly even if the store is later shared across concurrent callers.
//! - `list_operations` returns due_date-ascending order with ties broken by
//!   id ascending, so listings are deterministic for any insertion order.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{CompanyId, DomainPort, OperationId, StoreError};

use crate::company::{Company, NewCompany};
use crate::operation::{NewOperation, Operation, OperationKind, OperationStatus};

/// Filters for listing operations; all criteria combine with logical AND
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationFilter {
    /// Restrict to a status
    pub status: Option<OperationStatus>,
    /// Restrict to a kind
    pub kind: Option<OperationKind>,
    /// Restrict to one company
    pub company_id: Option<CompanyId>,
}

impl OperationFilter {
    /// Matches every operation
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to the given status
    pub fn with_status(mut self, status: OperationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to the given kind
    pub fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to the given company
    pub fn with_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Applies the filter to a single operation
    pub fn matches(&self, operation: &Operation) -> bool {
        self.status.map_or(true, |s| operation.status == s)
            && self.kind.map_or(true, |k| operation.kind == k)
            && self.company_id.map_or(true, |c| operation.company_id == c)
    }
}

/// Storage contract for companies and operations
///
/// Only the lifecycle engine mutates through this port; the rollup engine
/// reads. Lookups surface absence as `None`; mutations referencing missing
/// ids fail with `StoreError::NotFound`.
#[async_trait]
pub trait LedgerStore: DomainPort {
    /// Inserts a company and returns its generated id
    ///
    /// Fails with `StoreError::Conflict` if the canonical name is already
    /// registered, active or not.
    async fn insert_company(&self, company: &NewCompany) -> Result<CompanyId, StoreError>;

    /// Retrieves a company by id
    async fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;

    /// Lists companies ordered by name, optionally active only
    async fn list_companies(&self, active_only: bool) -> Result<Vec<Company>, StoreError>;

    /// Flags a company inactive; returns the number of affected rows (0 or 1)
    ///
    /// Never removes the row; existing operations keep referencing it.
    async fn deactivate_company(&self, id: CompanyId) -> Result<u64, StoreError>;

    /// Inserts an operation and returns its generated id
    ///
    /// Fails with `StoreError::NotFound` if the company id is unknown; no
    /// orphan operation is ever persisted.
    async fn insert_operation(&self, operation: &NewOperation) -> Result<OperationId, StoreError>;

    /// Retrieves an operation by id, joined with its company name
    async fn get_operation(&self, id: OperationId) -> Result<Option<Operation>, StoreError>;

    /// Lists operations matching the filter
    ///
    /// Ordered by due_date ascending, ties by id ascending; each record is
    /// joined with its company's display name.
    async fn list_operations(&self, filter: &OperationFilter) -> Result<Vec<Operation>, StoreError>;

    /// Conditionally updates an operation's status
    ///
    /// The update applies only when the stored status still equals
    /// `expected_current`; the returned count is 1 on success, 0 when the
    /// operation is missing or no longer in the expected status. This is the
    /// state-machine guard and must be atomic in every implementation.
    async fn update_operation_status(
        &self,
        id: OperationId,
        expected_current: OperationStatus,
        new_status: OperationStatus,
        settlement_date: Option<NaiveDate>,
    ) -> Result<u64, StoreError>;
}

/// In-memory implementation of the ledger store
///
/// Preserves the port's contract — unique names, referential integrity,
/// compare-and-set status updates, deterministic ordering — without a
/// database, for unit and service tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// In-memory ledger store
    #[derive(Debug, Default)]
    pub struct MemoryLedgerStore {
        companies: RwLock<HashMap<CompanyId, Company>>,
        operations: RwLock<HashMap<OperationId, Operation>>,
    }

    impl MemoryLedgerStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        // The name is resolved on every read, matching the SQL adapter's join.
        fn joined(stored: &Operation, companies: &HashMap<CompanyId, Company>) -> Operation {
            let mut operation = stored.clone();
            if let Some(company) = companies.get(&operation.company_id) {
                operation.company_name = company.name.clone();
            }
            operation
        }
    }

    impl DomainPort for MemoryLedgerStore {}

    #[async_trait]
    impl LedgerStore for MemoryLedgerStore {
        async fn insert_company(&self, company: &NewCompany) -> Result<CompanyId, StoreError> {
            let mut companies = self.companies.write().await;

            if companies.values().any(|c| c.name == company.name()) {
                return Err(StoreError::conflict(format!(
                    "company name '{}' already registered",
                    company.name()
                )));
            }

            let id = CompanyId::new_v7();
            companies.insert(
                id,
                Company {
                    id,
                    name: company.name().to_string(),
                    tax_id: company.tax_id().map(str::to_string),
                    active: true,
                    created_at: Utc::now(),
                },
            );
            Ok(id)
        }

        async fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
            Ok(self.companies.read().await.get(&id).cloned())
        }

        async fn list_companies(&self, active_only: bool) -> Result<Vec<Company>, StoreError> {
            let companies = self.companies.read().await;
            let mut result: Vec<Company> = companies
                .values()
                .filter(|c| !active_only || c.active)
                .cloned()
                .collect();
            result.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(result)
        }

        async fn deactivate_company(&self, id: CompanyId) -> Result<u64, StoreError> {
            let mut companies = self.companies.write().await;
            match companies.get_mut(&id) {
                Some(company) => {
                    company.active = false;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn insert_operation(
            &self,
            operation: &NewOperation,
        ) -> Result<OperationId, StoreError> {
            let companies = self.companies.read().await;
            let company = companies
                .get(&operation.company_id)
                .ok_or_else(|| StoreError::not_found("Company", operation.company_id))?;

            let id = OperationId::new_v7();
            let stored = Operation {
                id,
                kind: operation.kind,
                company_id: operation.company_id,
                company_name: company.name.clone(),
                description: operation.description.clone(),
                amount: operation.amount,
                term_days: operation.term_days,
                operation_date: operation.operation_date,
                due_date: operation.due_date,
                settlement_date: None,
                status: OperationStatus::Open,
                notes: operation.notes.clone(),
                created_at: Utc::now(),
            };
            self.operations.write().await.insert(id, stored);
            Ok(id)
        }

        async fn get_operation(&self, id: OperationId) -> Result<Option<Operation>, StoreError> {
            let companies = self.companies.read().await;
            let operations = self.operations.read().await;
            Ok(operations.get(&id).map(|op| Self::joined(op, &companies)))
        }

        async fn list_operations(
            &self,
            filter: &OperationFilter,
        ) -> Result<Vec<Operation>, StoreError> {
            let companies = self.companies.read().await;
            let operations = self.operations.read().await;

            let mut result: Vec<Operation> = operations
                .values()
                .map(|op| Self::joined(op, &companies))
                .filter(|op| filter.matches(op))
                .collect();
            result.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
            Ok(result)
        }

        async fn update_operation_status(
            &self,
            id: OperationId,
            expected_current: OperationStatus,
            new_status: OperationStatus,
            settlement_date: Option<NaiveDate>,
        ) -> Result<u64, StoreError> {
            // Single write-lock section: the check and the write are atomic.
            let mut operations = self.operations.write().await;
            match operations.get_mut(&id) {
                Some(stored) if stored.status == expected_current => {
                    stored.status = new_status;
                    stored.settlement_date = settlement_date;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemoryLedgerStore;
    use super::*;
    use core_kernel::Amount;
    use rust_decimal_macros::dec;

    fn draft(company_id: CompanyId, due: NaiveDate) -> NewOperation {
        NewOperation {
            kind: OperationKind::Purchase,
            company_id,
            description: None,
            amount: Amount::new(dec!(100)).unwrap(),
            term_days: 7,
            operation_date: due - chrono::Days::new(7),
            due_date: due,
            notes: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_company(store: &MemoryLedgerStore, name: &str) -> CompanyId {
        store
            .insert_company(&NewCompany::new(name, None).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_company_name_conflicts() {
        let store = MemoryLedgerStore::new();
        seeded_company(&store, "Acme").await;

        let result = store
            .insert_company(&NewCompany::new("acme", None).unwrap())
            .await;
        assert!(result.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_orphan_operation_rejected() {
        let store = MemoryLedgerStore::new();
        let result = store
            .insert_operation(&draft(CompanyId::new_v7(), date(2024, 3, 1)))
            .await;

        assert!(result.unwrap_err().is_not_found());
        assert!(store
            .list_operations(&OperationFilter::all())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_due_date() {
        let store = MemoryLedgerStore::new();
        let company = seeded_company(&store, "Acme").await;

        store
            .insert_operation(&draft(company, date(2024, 3, 20)))
            .await
            .unwrap();
        store
            .insert_operation(&draft(company, date(2024, 3, 5)))
            .await
            .unwrap();
        store
            .insert_operation(&draft(company, date(2024, 3, 12)))
            .await
            .unwrap();

        let listed = store.list_operations(&OperationFilter::all()).await.unwrap();
        let due_dates: Vec<NaiveDate> = listed.iter().map(|op| op.due_date).collect();
        assert_eq!(
            due_dates,
            vec![date(2024, 3, 5), date(2024, 3, 12), date(2024, 3, 20)]
        );
    }

    #[tokio::test]
    async fn test_conditional_update_is_single_shot() {
        let store = MemoryLedgerStore::new();
        let company = seeded_company(&store, "Acme").await;
        let id = store
            .insert_operation(&draft(company, date(2024, 3, 1)))
            .await
            .unwrap();

        let first = store
            .update_operation_status(
                id,
                OperationStatus::Open,
                OperationStatus::Settled,
                Some(date(2024, 3, 2)),
            )
            .await
            .unwrap();
        assert_eq!(first, 1);

        let second = store
            .update_operation_status(
                id,
                OperationStatus::Open,
                OperationStatus::Canceled,
                None,
            )
            .await
            .unwrap();
        assert_eq!(second, 0);

        let op = store.get_operation(id).await.unwrap().unwrap();
        assert_eq!(op.status, OperationStatus::Settled);
        assert_eq!(op.settlement_date, Some(date(2024, 3, 2)));
    }

    #[tokio::test]
    async fn test_deactivated_company_name_still_resolves() {
        let store = MemoryLedgerStore::new();
        let company = seeded_company(&store, "Acme").await;
        let id = store
            .insert_operation(&draft(company, date(2024, 3, 1)))
            .await
            .unwrap();

        assert_eq!(store.deactivate_company(company).await.unwrap(), 1);

        let op = store.get_operation(id).await.unwrap().unwrap();
        assert_eq!(op.company_name, "ACME");
    }
}
