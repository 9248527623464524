//! Dashboard aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{Dashboard, DashboardTotals, StatusCount};
use crate::ledger::{
    LedgerAggregator, LedgerError, LedgerSnapshot, ProjectStatus, ReportFilter, checked,
};
use crate::period::DateRange;

/// Builds the tenant dashboard.
pub struct DashboardService;

impl DashboardService {
    /// Computes all-time dashboard figures and a `trend_months` expense trend
    /// ending with the month of `today`.
    pub fn build(
        snapshot: &LedgerSnapshot,
        today: NaiveDate,
        trend_months: u32,
    ) -> Result<Dashboard, LedgerError> {
        let filter = ReportFilter::new();
        let agg = LedgerAggregator::new(snapshot, &filter);
        let all = DateRange::all_time();

        let projects_by_status = ProjectStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: agg.projects().filter(|p| p.status == status).count(),
            })
            .collect();

        let budget = agg.total_budget()?;
        let received = agg.total_received(all)?;

        Ok(Dashboard {
            project_count: snapshot.projects.len(),
            projects_by_status,
            totals: DashboardTotals {
                budget,
                received,
                expenses: agg.total_expenses(all)?,
                outstanding: checked::sub("outstanding", budget, received)?.max(Decimal::ZERO),
            },
            expenses_by_project: agg.expenses_by_project(all)?,
            deposits_by_project: agg.deposits_by_project(all)?,
            expenses_by_category: agg.expenses_by_category(all)?,
            monthly_expenses: agg.monthly_expenses(today, trend_months)?,
        })
    }
}
