//! Report routes.
//!
//! Month-range reports answer `{"status":"awaiting_period"}` until both
//! `from` and `to` are supplied. The summary falls back to all time.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use buildbook_core::ledger::{ExpenseCategory, ReportFilter};
use buildbook_core::period::{parse_open_range, parse_period};
use buildbook_core::reports::{BalanceSheet, FinancialReport, ProfitAndLoss, ReportSummary};
use buildbook_db::ReportRepository;
use buildbook_shared::AppError;
use buildbook_shared::types::{ClientId, MaterialId, ProjectId, TenantId};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, middleware::CurrentTenant};

/// Creates the report routes (requires tenant middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/balance-sheet", get(get_balance_sheet))
        .route("/reports/profit-loss", get(get_profit_and_loss))
        .route("/reports/financial", get(get_financial_report))
        .route("/reports/summary", get(get_summary))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters shared by the report endpoints. Values arrive as raw
/// strings; blanks count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Start month (`YYYY-MM`) or date (`YYYY-MM-DD`).
    pub from: Option<String>,
    /// End month or date.
    pub to: Option<String>,
    /// Restrict to one project.
    #[serde(alias = "projectId")]
    pub project_id: Option<String>,
    /// Restrict to one client's projects.
    #[serde(alias = "clientId")]
    pub client_id: Option<String>,
    /// Restrict to one expense category (financial report only).
    pub category: Option<String>,
    /// Restrict to expenses with an item of this catalog material (financial report only).
    #[serde(alias = "materialId")]
    pub material_id: Option<String>,
    /// Restrict to expenses with an item of this material name (financial report only).
    pub material: Option<String>,
}

impl ReportQuery {
    fn project_filter(&self) -> Result<ReportFilter, ApiError> {
        let mut filter = ReportFilter::new();
        if let Some(id) = parse_param::<ProjectId>("projectId", self.project_id.as_deref())? {
            filter = filter.with_project(id);
        }
        if let Some(id) = parse_param::<ClientId>("clientId", self.client_id.as_deref())? {
            filter = filter.with_client(id);
        }
        Ok(filter)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for reports that need a complete period.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodReport<T> {
    /// No period was given yet; nothing was computed.
    AwaitingPeriod,
    /// The report for the requested period.
    Ready {
        /// Report body.
        report: T,
    },
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses an optional query value, treating blanks as absent.
fn parse_param<T: FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ApiError(AppError::Validation(format!(
                "Invalid {field} value '{value}'"
            )))
        }),
    }
}

async fn financial_filter(
    repo: &ReportRepository,
    tenant_id: TenantId,
    query: &ReportQuery,
) -> Result<ReportFilter, ApiError> {
    let mut filter = query.project_filter()?;

    if let Some(category) = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        filter = filter.with_category(ExpenseCategory::from_str(category)?);
    }

    if let Some(material_id) = parse_param::<MaterialId>("materialId", query.material_id.as_deref())?
    {
        filter = filter.with_material(repo.material_name(tenant_id, material_id).await?);
    } else if let Some(material) = query.material.as_deref() {
        filter = filter.with_material(material);
    }

    Ok(filter)
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_balance_sheet(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PeriodReport<BalanceSheet>>, ApiError> {
    let Some(period) = parse_period(query.from.as_deref(), query.to.as_deref())? else {
        return Ok(Json(PeriodReport::AwaitingPeriod));
    };
    let filter = query.project_filter()?;

    let repo = ReportRepository::new(Arc::clone(&state.db));
    let report = repo.balance_sheet(tenant.id(), &period, &filter).await?;

    Ok(Json(PeriodReport::Ready { report }))
}

async fn get_profit_and_loss(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PeriodReport<ProfitAndLoss>>, ApiError> {
    let Some(period) = parse_period(query.from.as_deref(), query.to.as_deref())? else {
        return Ok(Json(PeriodReport::AwaitingPeriod));
    };
    let filter = query.project_filter()?;

    let repo = ReportRepository::new(Arc::clone(&state.db));
    let report = repo.profit_and_loss(tenant.id(), &period, &filter).await?;

    Ok(Json(PeriodReport::Ready { report }))
}

async fn get_financial_report(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PeriodReport<FinancialReport>>, ApiError> {
    let Some(period) = parse_period(query.from.as_deref(), query.to.as_deref())? else {
        return Ok(Json(PeriodReport::AwaitingPeriod));
    };

    let repo = ReportRepository::new(Arc::clone(&state.db));
    let filter = financial_filter(&repo, tenant.id(), &query).await?;
    let report = repo.financial_report(tenant.id(), &period, &filter).await?;

    Ok(Json(PeriodReport::Ready { report }))
}

async fn get_summary(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportSummary>, ApiError> {
    let range = parse_open_range(query.from.as_deref(), query.to.as_deref())?;

    let repo = ReportRepository::new(Arc::clone(&state.db));
    Ok(Json(repo.summary(tenant.id(), range).await?))
}
