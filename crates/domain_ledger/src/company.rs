//! Counterparty companies
//!
//! A company is the counterparty of purchase/sale operations. Companies are
//! never physically deleted; deactivation flips the `active` flag and leaves
//! every referencing operation untouched.

use chrono::{DateTime, Utc};
use core_kernel::CompanyId;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A registered counterparty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier, assigned by the store on creation
    pub id: CompanyId,
    /// Display name, canonical uppercase, unique across active and inactive
    pub name: String,
    /// Optional tax identifier, free text with no format validation
    pub tax_id: Option<String>,
    /// False once deactivated; deactivation is a logical delete
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Validated input for registering a company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    name: String,
    tax_id: Option<String>,
}

impl NewCompany {
    /// Validates and canonicalizes registration input
    ///
    /// The name is trimmed and stored uppercase; an empty name is rejected.
    /// The tax id is kept as-is.
    pub fn new(name: &str, tax_id: Option<String>) -> Result<Self, LedgerError> {
        let name = canonical_name(name)?;
        Ok(Self { name, tax_id })
    }

    /// The canonical (uppercase) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The optional tax identifier
    pub fn tax_id(&self) -> Option<&str> {
        self.tax_id.as_deref()
    }
}

/// Canonicalizes a company name: trimmed, uppercase, non-empty
pub fn canonical_name(raw: &str) -> Result<String, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyCompanyName);
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_canonicalized() {
        let company = NewCompany::new("  Acme Supplies ", None).unwrap();
        assert_eq!(company.name(), "ACME SUPPLIES");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            NewCompany::new("   ", None),
            Err(LedgerError::EmptyCompanyName)
        ));
    }

    #[test]
    fn test_tax_id_is_free_text() {
        let company = NewCompany::new("Acme", Some("98-7654321".to_string())).unwrap();
        assert_eq!(company.tax_id(), Some("98-7654321"));
    }
}
