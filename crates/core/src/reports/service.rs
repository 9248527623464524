//! Report generation service.

use rust_decimal::Decimal;

use super::types::{
    BalanceSheet, FinancialReport, FinancialTotals, ProfitAndLoss, ProjectSection,
    ProjectSummaryRow, ReportSummary,
};
use crate::ledger::{
    AssetCategory, ExpenseLine, InstallmentRecord, LedgerAggregator, LedgerError, LedgerSnapshot,
    ProjectRecord, ReportFilter, checked, expand_expense,
};
use crate::period::{DateRange, Period};

/// Service for generating financial reports.
///
/// Every builder fails with [`LedgerError::Overflow`] when a stored amount
/// makes a figure leave the decimal range; no partial report is returned.
pub struct ReportService;

impl ReportService {
    /// Builds the balance sheet as at `period.end`.
    ///
    /// Deposits and expenses are cumulative up to the end of the period.
    /// Asset totals ignore both the period and the filter.
    pub fn balance_sheet(
        snapshot: &LedgerSnapshot,
        period: &Period,
        filter: &ReportFilter,
    ) -> Result<BalanceSheet, LedgerError> {
        let agg = LedgerAggregator::new(snapshot, filter);
        let as_at = DateRange::as_at(period.end);

        let total_budget = agg.total_budget()?;
        let total_received = agg.total_received(as_at)?;
        let total_expenses = agg.total_expenses(as_at)?;
        let receivables = non_negative(checked::sub("receivables", total_budget, total_received)?);

        let fixed_assets_total = Self::asset_total(snapshot, AssetCategory::Fixed)?;
        let current_assets_total = Self::asset_total(snapshot, AssetCategory::Current)?;
        let total_assets = checked::sum(
            "total assets",
            [total_received, receivables, fixed_assets_total, current_assets_total],
        )?;

        Ok(BalanceSheet {
            as_at: period.end,
            total_budget,
            total_received,
            receivables,
            fixed_assets_total,
            current_assets_total,
            total_assets,
            total_expenses,
            net_position: checked::sub("net position", total_budget, total_expenses)?,
        })
    }

    /// Builds the profit and loss statement for `period`.
    pub fn profit_and_loss(
        snapshot: &LedgerSnapshot,
        period: &Period,
        filter: &ReportFilter,
    ) -> Result<ProfitAndLoss, LedgerError> {
        let agg = LedgerAggregator::new(snapshot, filter);
        let range = DateRange::within(period);

        let income = agg.total_received(range)?;
        let expenses_by_category = agg.expenses_by_category(range)?;
        let total_expenses =
            checked::sum("total expenses", expenses_by_category.iter().map(|c| c.total))?;

        Ok(ProfitAndLoss {
            period: *period,
            income,
            expenses_by_category,
            total_expenses,
            net_profit: checked::sub("net profit", income, total_expenses)?,
        })
    }

    /// Builds the per-project financial report for `period`.
    ///
    /// Every project matching the project/client dimensions gets a section,
    /// including projects without matching expenses. Sections are ordered by
    /// project name.
    pub fn financial_report(
        snapshot: &LedgerSnapshot,
        period: &Period,
        filter: &ReportFilter,
    ) -> Result<FinancialReport, LedgerError> {
        let agg = LedgerAggregator::new(snapshot, filter);
        let range = DateRange::within(period);
        let received = agg.deposits_by_project(range)?;

        let mut projects: Vec<&ProjectRecord> = agg.projects().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut sections = Vec::with_capacity(projects.len());
        for project in projects {
            let mut lines: Vec<ExpenseLine> = Vec::new();
            for expense in agg.expenses(range).filter(|e| e.project_id == project.id) {
                lines.extend(expand_expense(expense)?);
            }
            lines.sort_by_key(|line| line.date);
            let total = checked::sum("section total", lines.iter().map(|l| l.amount))?;

            sections.push(ProjectSection {
                project_id: project.id,
                name: project.name.clone(),
                status: project.status,
                budget: project.budget,
                received: received.get(&project.id).copied().unwrap_or_default(),
                start_date: project.start_date,
                end_date: project.end_date,
                lines,
                total,
                installments: Self::installments_for(snapshot, project),
            });
        }

        let totals = sections
            .iter()
            .try_fold(FinancialTotals::default(), |acc, section| {
                Ok::<_, LedgerError>(FinancialTotals {
                    budget: checked::add("budget total", acc.budget, section.budget)?,
                    received: checked::add("received total", acc.received, section.received)?,
                    expenses: checked::add("expense total", acc.expenses, section.total)?,
                })
            })?;

        Ok(FinancialReport {
            period: *period,
            filter: filter.clone(),
            sections,
            totals,
        })
    }

    /// Builds the simple reports summary. An open range means all time.
    pub fn summary(snapshot: &LedgerSnapshot, range: DateRange) -> Result<ReportSummary, LedgerError> {
        let filter = ReportFilter::new();
        let agg = LedgerAggregator::new(snapshot, &filter);

        let received = agg.deposits_by_project(range)?;
        let expenses = agg.expenses_by_project(range)?;

        let mut projects = Vec::new();
        for project in agg.projects() {
            let received = received.get(&project.id).copied().unwrap_or_default();
            projects.push(ProjectSummaryRow {
                project_id: project.id,
                name: project.name.clone(),
                status: project.status,
                budget: project.budget,
                received,
                expenses: expenses.get(&project.id).copied().unwrap_or_default(),
                outstanding: non_negative(checked::sub("outstanding", project.budget, received)?),
            });
        }
        projects.sort_by(|a, b| a.name.cmp(&b.name).then(a.project_id.cmp(&b.project_id)));

        let total_received = agg.total_received(range)?;
        let total_expenses = agg.total_expenses(range)?;

        Ok(ReportSummary {
            range,
            total_budget: agg.total_budget()?,
            total_received,
            total_expenses,
            cash_balance: checked::sub("cash balance", total_received, total_expenses)?,
            expenses_by_category: agg.expenses_by_category(range)?,
            projects,
        })
    }

    fn asset_total(snapshot: &LedgerSnapshot, category: AssetCategory) -> Result<Decimal, LedgerError> {
        checked::sum(
            "asset total",
            snapshot
                .assets
                .iter()
                .filter(|a| a.category == category)
                .map(|a| a.cost),
        )
    }

    fn installments_for(snapshot: &LedgerSnapshot, project: &ProjectRecord) -> Vec<InstallmentRecord> {
        let mut installments: Vec<InstallmentRecord> = snapshot
            .installments
            .iter()
            .filter(|i| i.project_id == project.id)
            .cloned()
            .collect();
        // Undated installments go last within the same sort order.
        installments.sort_by_key(|i| (i.sort_order, i.due_date.is_none(), i.due_date));
        installments
    }
}

fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
