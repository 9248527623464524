//! Report repository: loads a tenant's ledger and hands it to the core
//! report builders.
//!
//! Reads run inside a tenant RLS transaction, so the row-level policies hold
//! even when the connection role owns the tables.

use std::sync::Arc;

use buildbook_core::dashboard::{Dashboard, DashboardService};
use buildbook_core::ledger::{LedgerError, LedgerSnapshot, ReportFilter};
use buildbook_core::period::{DateRange, Period};
use buildbook_core::reports::{
    BalanceSheet, FinancialReport, ProfitAndLoss, ReportService, ReportSummary,
};
use buildbook_shared::types::{MaterialId, TenantId};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DbErr};

use super::scoped::{ScopeError, TenantScope};
use crate::rls::RlsConnection;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A referenced record does not exist for the tenant.
    #[error("{0}")]
    NotFound(String),

    /// A stored amount makes a report figure leave the decimal range.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ScopeError> for ReportError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::NotFound { .. } | ScopeError::Validation(_) => {
                Self::NotFound(err.to_string())
            }
            ScopeError::Database(e) => Self::Database(e),
        }
    }
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Loads every live record of `tenant_id` the reports read.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn load_snapshot(&self, tenant_id: TenantId) -> Result<LedgerSnapshot, ReportError> {
        let rls = RlsConnection::new(&self.db, tenant_id).await?;
        let snapshot = TenantScope::new(rls.transaction(), tenant_id)
            .load_ledger()
            .await?;
        rls.commit().await?;
        Ok(snapshot)
    }

    /// Resolves a catalog material id to its name, for the material filter.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if the material is unknown to the tenant.
    pub async fn material_name(
        &self,
        tenant_id: TenantId,
        material_id: MaterialId,
    ) -> Result<String, ReportError> {
        let rls = RlsConnection::new(&self.db, tenant_id).await?;
        let name = TenantScope::new(rls.transaction(), tenant_id)
            .material_name(material_id)
            .await?;
        rls.commit().await?;
        Ok(name)
    }

    /// Balance sheet as at the end of `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be loaded or a figure overflows.
    pub async fn balance_sheet(
        &self,
        tenant_id: TenantId,
        period: &Period,
        filter: &ReportFilter,
    ) -> Result<BalanceSheet, ReportError> {
        let snapshot = self.load_snapshot(tenant_id).await?;
        Ok(ReportService::balance_sheet(&snapshot, period, filter)?)
    }

    /// Profit and loss for `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be loaded or a figure overflows.
    pub async fn profit_and_loss(
        &self,
        tenant_id: TenantId,
        period: &Period,
        filter: &ReportFilter,
    ) -> Result<ProfitAndLoss, ReportError> {
        let snapshot = self.load_snapshot(tenant_id).await?;
        Ok(ReportService::profit_and_loss(&snapshot, period, filter)?)
    }

    /// Per-project financial report for `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be loaded or a figure overflows.
    pub async fn financial_report(
        &self,
        tenant_id: TenantId,
        period: &Period,
        filter: &ReportFilter,
    ) -> Result<FinancialReport, ReportError> {
        let snapshot = self.load_snapshot(tenant_id).await?;
        Ok(ReportService::financial_report(&snapshot, period, filter)?)
    }

    /// Simple summary over an optional range.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be loaded or a figure overflows.
    pub async fn summary(
        &self,
        tenant_id: TenantId,
        range: DateRange,
    ) -> Result<ReportSummary, ReportError> {
        let snapshot = self.load_snapshot(tenant_id).await?;
        Ok(ReportService::summary(&snapshot, range)?)
    }

    /// Dashboard metrics as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be loaded or a figure overflows.
    pub async fn dashboard(
        &self,
        tenant_id: TenantId,
        today: NaiveDate,
        trend_months: u32,
    ) -> Result<Dashboard, ReportError> {
        let snapshot = self.load_snapshot(tenant_id).await?;
        Ok(DashboardService::build(&snapshot, today, trend_months)?)
    }
}
