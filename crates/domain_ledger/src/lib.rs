//! Ledger Domain - Operation Lifecycle and Financial Rollup
//!
//! This crate implements the core of the obligation ledger: purchase/sale
//! operations recorded against counterparty companies, with derived
//! accounts-payable / accounts-receivable reporting.
//!
//! # Components
//!
//! - **Company registry** ([`CompanyService`]): counterparty registration
//!   with canonical unique names and logical deletion.
//! - **Operation lifecycle** ([`OperationService`]): the state machine
//!   `Open → Settled | Canceled` with due dates derived from calendar-day
//!   terms. Terminal states accept no further transitions; refused
//!   transitions report `false`, never an error.
//! - **Financial rollup** ([`RollupService`]): payables, receivables,
//!   overdue listings, and the aggregate summary — pure functions of the
//!   stored operation set and an explicit reference date.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{CreateOperation, OperationKind, OperationService, RollupService};
//!
//! let ops = OperationService::new(store.clone(), clock);
//! let sale = ops
//!     .create(CreateOperation::new(OperationKind::Sale, company_id, amount))
//!     .await?;
//!
//! let reports = RollupService::new(store);
//! let summary = reports.summary(today).await?;
//! ```
//!
//! Data flows one direction: the lifecycle engine mutates operations through
//! the [`LedgerStore`] port, the rollup engine reads them. Neither depends
//! on presentation.

pub mod company;
pub mod error;
pub mod lifecycle;
pub mod operation;
pub mod ports;
pub mod registry;
pub mod rollup;

pub use company::{Company, NewCompany};
pub use error::LedgerError;
pub use lifecycle::{CreateOperation, OperationService, DEFAULT_TERM_DAYS};
pub use operation::{NewOperation, Operation, OperationKind, OperationStatus};
pub use ports::{LedgerStore, OperationFilter};
pub use registry::CompanyService;
pub use rollup::{FinancialSummary, RollupService};
