//! Builder patterns for test data construction
//!
//! Builders produce valid domain records with sensible defaults so tests
//! only spell out the fields they care about.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{due_date, Amount, CompanyId, OperationId};
use domain_ledger::{
    NewCompany, NewOperation, Operation, OperationKind, OperationStatus,
};

/// Default operation date used by [`OperationBuilder`]
pub fn default_operation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

/// Builder for [`NewCompany`] registration input
#[derive(Debug, Clone)]
pub struct CompanyBuilder {
    name: String,
    tax_id: Option<String>,
}

impl CompanyBuilder {
    /// Starts a builder with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: None,
        }
    }

    /// Sets the tax identifier
    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }

    /// Builds the validated registration input
    pub fn build(self) -> NewCompany {
        NewCompany::new(&self.name, self.tax_id).expect("builder produced invalid company")
    }
}

/// Builder for operations
///
/// `draft()` yields a [`NewOperation`] for store insertion; `build()` yields
/// a fully-formed [`Operation`] for pure in-memory tests. Due dates are
/// derived from the operation date and term unless pinned explicitly.
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    kind: OperationKind,
    company_id: CompanyId,
    company_name: String,
    description: Option<String>,
    amount: Decimal,
    term_days: u32,
    operation_date: NaiveDate,
    due_date: Option<NaiveDate>,
    settlement_date: Option<NaiveDate>,
    status: OperationStatus,
    notes: Option<String>,
}

impl OperationBuilder {
    /// Starts a purchase builder against the given company
    pub fn purchase(company_id: CompanyId) -> Self {
        Self::new(OperationKind::Purchase, company_id)
    }

    /// Starts a sale builder against the given company
    pub fn sale(company_id: CompanyId) -> Self {
        Self::new(OperationKind::Sale, company_id)
    }

    fn new(kind: OperationKind, company_id: CompanyId) -> Self {
        Self {
            kind,
            company_id,
            company_name: "TEST COMPANY".to_string(),
            description: None,
            amount: dec!(100.00),
            term_days: 7,
            operation_date: default_operation_date(),
            due_date: None,
            settlement_date: None,
            status: OperationStatus::Open,
            notes: None,
        }
    }

    /// Sets the amount
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the term in days
    pub fn term_days(mut self, term_days: u32) -> Self {
        self.term_days = term_days;
        self
    }

    /// Sets the operation date
    pub fn on_date(mut self, operation_date: NaiveDate) -> Self {
        self.operation_date = operation_date;
        self
    }

    /// Pins the due date directly instead of deriving it
    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the company display name used by `build()`
    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    /// Marks the built operation settled on the given date
    pub fn settled_on(mut self, settlement_date: NaiveDate) -> Self {
        self.status = OperationStatus::Settled;
        self.settlement_date = Some(settlement_date);
        self
    }

    /// Marks the built operation canceled
    pub fn canceled(mut self) -> Self {
        self.status = OperationStatus::Canceled;
        self.settlement_date = None;
        self
    }

    fn resolved_due_date(&self) -> NaiveDate {
        match self.due_date {
            Some(due) => due,
            None => due_date(self.operation_date, self.term_days)
                .expect("builder produced invalid term"),
        }
    }

    /// Builds a draft for store insertion (always status Open)
    pub fn draft(self) -> NewOperation {
        let due = self.resolved_due_date();
        NewOperation {
            kind: self.kind,
            company_id: self.company_id,
            description: self.description,
            amount: Amount::new(self.amount).expect("builder produced invalid amount"),
            term_days: self.term_days,
            operation_date: self.operation_date,
            due_date: due,
            notes: self.notes,
        }
    }

    /// Builds a complete operation record
    pub fn build(self) -> Operation {
        let due = self.resolved_due_date();
        Operation {
            id: OperationId::new_v7(),
            kind: self.kind,
            company_id: self.company_id,
            company_name: self.company_name.clone(),
            description: self.description,
            amount: Amount::new(self.amount).expect("builder produced invalid amount"),
            term_days: self.term_days,
            operation_date: self.operation_date,
            due_date: due,
            settlement_date: self.settlement_date,
            status: self.status,
            notes: self.notes,
            created_at: Utc::now(),
        }
    }
}
