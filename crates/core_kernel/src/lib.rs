//! Core Kernel - Foundational types and utilities for the obligation ledger
//!
//! This crate provides the fundamental building blocks used across all
//! ledger modules:
//! - Monetary amounts with precise decimal arithmetic
//! - Calendar-day due-date derivation and an injectable clock
//! - Strongly-typed identifiers
//! - Port infrastructure shared by store adapters

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{CompanyId, OperationId};
pub use money::{total, Amount, MoneyError};
pub use ports::{DomainPort, StoreError};
pub use temporal::{due_date, Clock, FixedClock, SystemClock, TemporalError};
