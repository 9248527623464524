//! Sums and groupings over a tenant's ledger snapshot.

use std::collections::{BTreeMap, BTreeSet};

use buildbook_shared::types::ProjectId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checked;
use super::error::LedgerError;
use super::filter::ReportFilter;
use super::series::{MonthlyTotal, monthly_series};
use super::types::{
    DepositRecord, ExpenseCategory, ExpenseRecord, LedgerSnapshot, ProjectRecord,
};
use crate::period::DateRange;

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category.
    pub category: ExpenseCategory,
    /// Sum of expenses in the category.
    pub total: Decimal,
}

/// Aggregates one snapshot under one filter.
///
/// The project set is fixed at construction: deposits and expenses only count
/// when they belong to a project matching the project/client dimensions.
#[derive(Debug)]
pub struct LedgerAggregator<'a> {
    snapshot: &'a LedgerSnapshot,
    filter: &'a ReportFilter,
    project_ids: BTreeSet<ProjectId>,
}

impl<'a> LedgerAggregator<'a> {
    /// Creates an aggregator.
    #[must_use]
    pub fn new(snapshot: &'a LedgerSnapshot, filter: &'a ReportFilter) -> Self {
        let project_ids = snapshot
            .projects
            .iter()
            .filter(|p| filter.matches_project(p))
            .map(|p| p.id)
            .collect();

        Self {
            snapshot,
            filter,
            project_ids,
        }
    }

    /// Projects matching the project/client dimensions, in snapshot order.
    pub fn projects(&self) -> impl Iterator<Item = &'a ProjectRecord> {
        let filter = self.filter;
        self.snapshot
            .projects
            .iter()
            .filter(move |p| filter.matches_project(p))
    }

    /// Sum of the matching projects' budgets. Never date-filtered.
    pub fn total_budget(&self) -> Result<Decimal, LedgerError> {
        checked::sum("total budget", self.projects().map(|p| p.budget))
    }

    /// Deposits of matching projects paid within `range`.
    pub fn deposits(&self, range: DateRange) -> impl Iterator<Item = &'a DepositRecord> {
        self.snapshot
            .deposits
            .iter()
            .filter(move |d| self.project_ids.contains(&d.project_id) && range.contains(d.paid_at))
    }

    /// Sum of [`Self::deposits`].
    pub fn total_received(&self, range: DateRange) -> Result<Decimal, LedgerError> {
        checked::sum("total received", self.deposits(range).map(|d| d.amount))
    }

    /// Expenses of matching projects within `range` that pass the category
    /// and material dimensions.
    pub fn expenses(&self, range: DateRange) -> impl Iterator<Item = &'a ExpenseRecord> {
        self.snapshot.expenses.iter().filter(move |e| {
            self.project_ids.contains(&e.project_id)
                && range.contains(e.expense_date)
                && self.filter.matches_expense(e)
        })
    }

    /// Sum of [`Self::expenses`].
    pub fn total_expenses(&self, range: DateRange) -> Result<Decimal, LedgerError> {
        checked::try_sum("total expenses", self.expenses(range).map(ExpenseRecord::total))
    }

    /// Expense totals per category in [`ExpenseCategory::ALL`] order.
    /// Categories without expenses are omitted.
    pub fn expenses_by_category(
        &self,
        range: DateRange,
    ) -> Result<Vec<CategoryTotal>, LedgerError> {
        let mut totals: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
        for expense in self.expenses(range) {
            let total = totals.entry(expense.category).or_default();
            *total = checked::add("category total", *total, expense.total()?)?;
        }

        Ok(ExpenseCategory::ALL
            .into_iter()
            .filter_map(|category| {
                totals
                    .get(&category)
                    .map(|&total| CategoryTotal { category, total })
            })
            .collect())
    }

    /// `project_id -> sum` of expenses. Projects without expenses are absent.
    pub fn expenses_by_project(
        &self,
        range: DateRange,
    ) -> Result<BTreeMap<ProjectId, Decimal>, LedgerError> {
        let mut totals = BTreeMap::new();
        for expense in self.expenses(range) {
            let total = totals.entry(expense.project_id).or_default();
            *total = checked::add("project expenses", *total, expense.total()?)?;
        }
        Ok(totals)
    }

    /// `project_id -> sum` of deposits. Projects without deposits are absent.
    pub fn deposits_by_project(
        &self,
        range: DateRange,
    ) -> Result<BTreeMap<ProjectId, Decimal>, LedgerError> {
        let mut totals = BTreeMap::new();
        for deposit in self.deposits(range) {
            let total = totals.entry(deposit.project_id).or_default();
            *total = checked::add("project deposits", *total, deposit.amount)?;
        }
        Ok(totals)
    }

    /// Dense expense series for the `months` months ending with `today`'s month.
    pub fn monthly_expenses(
        &self,
        today: NaiveDate,
        months: u32,
    ) -> Result<Vec<MonthlyTotal>, LedgerError> {
        let values = self
            .expenses(DateRange::all_time())
            .map(|e| Ok((e.expense_date.date(), e.total()?)))
            .collect::<Result<Vec<_>, LedgerError>>()?;
        monthly_series(today, months, values)
    }
}
