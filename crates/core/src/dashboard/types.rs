//! Dashboard data types.

use std::collections::BTreeMap;

use buildbook_shared::types::ProjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{CategoryTotal, MonthlyTotal, ProjectStatus};

/// Dashboard metrics response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Number of non-deleted projects.
    pub project_count: usize,
    /// Project counts per status, every status listed.
    pub projects_by_status: Vec<StatusCount>,
    /// All-time totals.
    pub totals: DashboardTotals,
    /// `project_id -> sum` of expenses.
    pub expenses_by_project: BTreeMap<ProjectId, Decimal>,
    /// `project_id -> sum` of deposits.
    pub deposits_by_project: BTreeMap<ProjectId, Decimal>,
    /// Expenses per category.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Dense expense trend ending with the current month.
    pub monthly_expenses: Vec<MonthlyTotal>,
}

/// Number of projects in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    /// Status.
    pub status: ProjectStatus,
    /// Count.
    pub count: usize,
}

/// Headline figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum of project budgets.
    pub budget: Decimal,
    /// Sum of deposits.
    pub received: Decimal,
    /// Sum of expenses.
    pub expenses: Decimal,
    /// `max(0, budget - received)`.
    pub outstanding: Decimal,
}
