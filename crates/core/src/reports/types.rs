//! Report data types.

use buildbook_shared::types::ProjectId;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{CategoryTotal, ExpenseLine, InstallmentRecord, ProjectStatus, ReportFilter};
use crate::period::{DateRange, Period};

/// Balance sheet as at the end of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Snapshot instant.
    pub as_at: NaiveDateTime,
    /// Contract value of the matching projects.
    pub total_budget: Decimal,
    /// Deposits paid up to `as_at`.
    pub total_received: Decimal,
    /// `max(0, total_budget - total_received)`.
    pub receivables: Decimal,
    /// Fixed asset cost.
    pub fixed_assets_total: Decimal,
    /// Current asset cost.
    pub current_assets_total: Decimal,
    /// `total_received + receivables + fixed_assets_total + current_assets_total`.
    pub total_assets: Decimal,
    /// Expenses incurred up to `as_at`.
    pub total_expenses: Decimal,
    /// `total_budget - total_expenses`.
    pub net_position: Decimal,
}

/// Profit and loss over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Reporting period.
    pub period: Period,
    /// Deposits paid within the period.
    pub income: Decimal,
    /// Expenses per category, enum order, empty categories omitted.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Sum of `expenses_by_category`.
    pub total_expenses: Decimal,
    /// `income - total_expenses`.
    pub net_profit: Decimal,
}

impl ProfitAndLoss {
    /// Returns true if expenses exceed income.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}

/// One project's part of the financial report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Project ID.
    pub project_id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project status.
    pub status: ProjectStatus,
    /// Contract value.
    pub budget: Decimal,
    /// Deposits received within the period.
    pub received: Decimal,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned end.
    pub end_date: Option<NaiveDate>,
    /// Expanded expense rows, sorted by date.
    pub lines: Vec<ExpenseLine>,
    /// Sum of `lines`.
    pub total: Decimal,
    /// Installment schedule, by sort order then due date.
    pub installments: Vec<InstallmentRecord>,
}

impl ProjectSection {
    /// Returns false when the section should render its empty state.
    #[must_use]
    pub fn has_expenses(&self) -> bool {
        !self.lines.is_empty()
    }
}

/// Totals across all sections of a financial report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTotals {
    /// Sum of section budgets.
    pub budget: Decimal,
    /// Sum of section receipts.
    pub received: Decimal,
    /// Sum of section expense totals.
    pub expenses: Decimal,
}

/// Per-project financial statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    /// Reporting period.
    pub period: Period,
    /// Filter the report was built with.
    pub filter: ReportFilter,
    /// One section per matching project.
    pub sections: Vec<ProjectSection>,
    /// Totals.
    pub totals: FinancialTotals,
}

/// One project row of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummaryRow {
    /// Project ID.
    pub project_id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project status.
    pub status: ProjectStatus,
    /// Contract value.
    pub budget: Decimal,
    /// Deposits within the range.
    pub received: Decimal,
    /// Expenses within the range.
    pub expenses: Decimal,
    /// `max(0, budget - received)`.
    pub outstanding: Decimal,
}

/// Simple reports page. An open range means all time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Range the figures cover.
    pub range: DateRange,
    /// Sum of project budgets.
    pub total_budget: Decimal,
    /// Deposits within the range.
    pub total_received: Decimal,
    /// Expenses within the range.
    pub total_expenses: Decimal,
    /// `total_received - total_expenses`.
    pub cash_balance: Decimal,
    /// Expenses per category.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Per-project rows, by name.
    pub projects: Vec<ProjectSummaryRow>,
}
