//! Company registry
//!
//! Registration and lookup of counterparties. Thin by design: the store
//! enforces name uniqueness, the service canonicalizes input and translates
//! conflicts.

use std::sync::Arc;

use tracing::info;

use core_kernel::CompanyId;

use crate::company::{Company, NewCompany};
use crate::error::LedgerError;
use crate::ports::LedgerStore;

/// The company registration service
#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn LedgerStore>,
}

impl CompanyService {
    /// Creates the service over a store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Registers a company and returns the persisted record
    ///
    /// The name is canonicalized to uppercase before storage; duplicates
    /// (against active and inactive companies alike) fail with
    /// [`LedgerError::DuplicateCompanyName`].
    pub async fn register(
        &self,
        name: &str,
        tax_id: Option<String>,
    ) -> Result<Company, LedgerError> {
        let new_company = NewCompany::new(name, tax_id)?;

        let id = self
            .store
            .insert_company(&new_company)
            .await
            .map_err(|e| match e {
                e if e.is_conflict() => {
                    LedgerError::DuplicateCompanyName(new_company.name().to_string())
                }
                e => LedgerError::Store(e),
            })?;

        info!(%id, name = new_company.name(), "company registered");

        self.store
            .get_company(id)
            .await?
            .ok_or_else(|| LedgerError::Store(core_kernel::StoreError::not_found("Company", id)))
    }

    /// Retrieves one company, if it exists
    pub async fn get(&self, id: CompanyId) -> Result<Option<Company>, LedgerError> {
        Ok(self.store.get_company(id).await?)
    }

    /// Lists companies ordered by name
    pub async fn list(&self, active_only: bool) -> Result<Vec<Company>, LedgerError> {
        Ok(self.store.list_companies(active_only).await?)
    }

    /// Deactivates a company (logical delete)
    ///
    /// Returns false when the id is unknown. Operations referencing the
    /// company are not altered or hidden.
    pub async fn deactivate(&self, id: CompanyId) -> Result<bool, LedgerError> {
        let affected = self.store.deactivate_company(id).await?;
        if affected > 0 {
            info!(%id, "company deactivated");
        }
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MemoryLedgerStore;

    fn service() -> CompanyService {
        CompanyService::new(Arc::new(MemoryLedgerStore::new()))
    }

    #[tokio::test]
    async fn test_register_canonicalizes_and_returns_record() {
        let service = service();
        let company = service
            .register("  northwind traders ", Some("98.765".to_string()))
            .await
            .unwrap();

        assert_eq!(company.name, "NORTHWIND TRADERS");
        assert_eq!(company.tax_id.as_deref(), Some("98.765"));
        assert!(company.active);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let service = service();
        service.register("Acme", None).await.unwrap();

        let result = service.register("ACME", None).await;
        assert!(matches!(
            result,
            Err(LedgerError::DuplicateCompanyName(name)) if name == "ACME"
        ));
    }

    #[tokio::test]
    async fn test_deactivate_is_logical() {
        let service = service();
        let company = service.register("Acme", None).await.unwrap();

        assert!(service.deactivate(company.id).await.unwrap());

        // Gone from the active listing, still retrievable by id.
        assert!(service.list(true).await.unwrap().is_empty());
        let stored = service.get(company.id).await.unwrap().unwrap();
        assert!(!stored.active);

        // Its name stays reserved.
        assert!(service.register("Acme", None).await.is_err());
    }

    #[tokio::test]
    async fn test_deactivate_unknown_company_returns_false() {
        let service = service();
        assert!(!service.deactivate(CompanyId::new_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let service = service();
        service.register("Zenith", None).await.unwrap();
        service.register("Acme", None).await.unwrap();
        service.register("Mid Corp", None).await.unwrap();

        let names: Vec<String> = service
            .list(true)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["ACME", "MID CORP", "ZENITH"]);
    }
}
