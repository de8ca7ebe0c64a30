//! Repository implementations for ledger entities

pub mod companies;
pub mod operations;

pub use companies::{CompanyRepository, CompanyRow};
pub use operations::{NewOperationRow, OperationRepository, OperationRow, OperationRowFilter};
