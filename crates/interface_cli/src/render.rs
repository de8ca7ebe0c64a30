//! Plain-text rendering of core records
//!
//! The core returns data records; everything about how they look on a
//! terminal lives here.

use domain_ledger::{Company, FinancialSummary, Operation};

/// One company per line: id, name, tax id, active flag
pub fn company_line(company: &Company) -> String {
    format!(
        "{}  {:<30}  {:<20}  {}",
        company.id,
        company.name,
        company.tax_id.as_deref().unwrap_or("-"),
        if company.active { "active" } else { "inactive" },
    )
}

/// One operation per line: id, kind, company, amount, due date, status
pub fn operation_line(operation: &Operation) -> String {
    let settlement = operation
        .settlement_date
        .map(|d| format!("  settled {d}"))
        .unwrap_or_default();

    format!(
        "{}  {:<8}  {:<30}  {:>12}  due {}  {}{}",
        operation.id,
        operation.kind,
        operation.company_name,
        operation.amount.to_string(),
        operation.due_date,
        operation.status,
        settlement,
    )
}

/// Multi-line financial summary block
pub fn summary_block(summary: &FinancialSummary) -> String {
    format!(
        "total payable:      {:>14}\n\
         total receivable:   {:>14}\n\
         projected balance:  {:>14}\n\
         overdue:            {} operation(s), {}",
        format!("{:.2}", summary.total_payable),
        format!("{:.2}", summary.total_receivable),
        format!("{:.2}", summary.projected_balance),
        summary.overdue_count,
        format!("{:.2}", summary.overdue_amount),
    )
}
