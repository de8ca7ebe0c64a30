//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the obligation ledger. This crate implements
//! the domain's store port over SQLx and hides every database detail from
//! the engines:
//!
//! - Rows are decoded into statically-typed records at this boundary; the
//!   domain never sees dynamic fields.
//! - The schema's CHECK constraints back up the typed enums and the
//!   positive-amount rule, but validation happens in the domain first.
//! - The status-conditioned UPDATE is the atomic guard behind the
//!   settle/cancel contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, run_migrations, PostgresLedgerStore};
//!
//! let pool = create_pool_from_url("postgres://localhost/ledger").await?;
//! run_migrations(&pool).await?;
//! let store = PostgresLedgerStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;
pub mod store;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use store::PostgresLedgerStore;
