//! Dashboard routes.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use buildbook_core::dashboard::Dashboard;
use buildbook_db::ReportRepository;
use chrono::Utc;

use crate::{AppState, error::ApiError, middleware::CurrentTenant};

/// Creates the dashboard routes (requires tenant middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    tenant: CurrentTenant,
) -> Result<Json<Dashboard>, ApiError> {
    let repo = ReportRepository::new(Arc::clone(&state.db));
    let dashboard = repo
        .dashboard(
            tenant.id(),
            Utc::now().date_naive(),
            state.reports.trend_months,
        )
        .await?;

    Ok(Json(dashboard))
}
