//! Ports infrastructure
//!
//! Domain crates define port traits for the collaborators they need (the
//! ledger store); adapters implement those traits — a database-backed
//! implementation for production, an in-memory one for tests. All port
//! implementations share a single error type so callers handle failures
//! uniformly regardless of the adapter behind the trait.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all store implementations must use,
/// ensuring consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The operation conflicts with existing data (e.g. duplicate unique key)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// A stored value could not be mapped back into a domain type
    #[error("Corrupt record: {message}")]
    Corrupt { message: String },

    /// Connection to the underlying storage failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal storage error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Corrupt error
    pub fn corrupt(message: impl Into<String>) -> Self {
        StoreError::Corrupt {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error indicates a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this marker so implementations are thread-safe and
/// usable in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_not_found() {
        let error = StoreError::not_found("Company", "CMP-123");
        assert!(error.is_not_found());
        assert!(!error.is_conflict());
        assert!(error.to_string().contains("Company"));
        assert!(error.to_string().contains("CMP-123"));
    }

    #[test]
    fn test_store_error_conflict() {
        let error = StoreError::conflict("company name already registered");
        assert!(error.is_conflict());
        assert!(!error.is_not_found());
    }
}
