//! Pre-built test data for common scenarios

use std::sync::Arc;

use core_kernel::CompanyId;
use domain_ledger::ports::mock::MemoryLedgerStore;
use domain_ledger::LedgerStore;

use crate::builders::CompanyBuilder;

/// An empty in-memory store
pub fn empty_store() -> Arc<MemoryLedgerStore> {
    Arc::new(MemoryLedgerStore::new())
}

/// A store seeded with one registered company
pub async fn store_with_company(name: &str) -> (Arc<MemoryLedgerStore>, CompanyId) {
    let store = empty_store();
    let id = store
        .insert_company(&CompanyBuilder::new(name).build())
        .await
        .expect("seeding company failed");
    (store, id)
}

/// A store seeded with several registered companies, in argument order
pub async fn store_with_companies(
    names: &[&str],
) -> (Arc<MemoryLedgerStore>, Vec<CompanyId>) {
    let store = empty_store();
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id = store
            .insert_company(&CompanyBuilder::new(*name).build())
            .await
            .expect("seeding company failed");
        ids.push(id);
    }
    (store, ids)
}
