//! Project routes: detail, status changes, deletion and deposits.
//!
//! Every query runs in a tenant RLS transaction and also carries an explicit
//! tenant filter.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use buildbook_core::ledger::{DepositRecord, ProjectStatus};
use buildbook_db::repositories::{NewDeposit, ProjectDetail};
use buildbook_db::{RlsConnection, TenantScope};
use buildbook_shared::types::{DepositId, ProjectId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::CurrentTenant};

/// Creates the project routes (requires tenant middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}",
            get(get_project).delete(delete_project),
        )
        .route("/projects/{project_id}/status", patch(update_status))
        .route("/projects/{project_id}/deposits", post(create_deposit))
        .route("/deposits/{deposit_id}", delete(delete_deposit))
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status.
    pub status: ProjectStatus,
}

/// Response for a status change.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Project id.
    pub id: ProjectId,
    /// Status after the change.
    pub status: ProjectStatus,
}

async fn get_project(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<ProjectDetail>, ApiError> {
    let rls = RlsConnection::new(&state.db, tenant.id()).await?;
    let detail = TenantScope::new(rls.transaction(), tenant.id())
        .project_detail(project_id, state.features)
        .await?;
    rls.commit().await?;

    Ok(Json(detail))
}

async fn update_status(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Path(project_id): Path<ProjectId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let rls = RlsConnection::new(&state.db, tenant.id()).await?;
    TenantScope::new(rls.transaction(), tenant.id())
        .update_project_status(project_id, body.status)
        .await?;
    rls.commit().await?;

    info!(
        tenant_id = %tenant.id(),
        project_id = %project_id,
        status = %body.status,
        "Project status changed"
    );
    Ok(Json(StatusResponse {
        id: project_id,
        status: body.status,
    }))
}

async fn delete_project(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Path(project_id): Path<ProjectId>,
) -> Result<StatusCode, ApiError> {
    let rls = RlsConnection::new(&state.db, tenant.id()).await?;
    TenantScope::new(rls.transaction(), tenant.id())
        .soft_delete_project(project_id)
        .await?;
    rls.commit().await?;

    info!(tenant_id = %tenant.id(), project_id = %project_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn create_deposit(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Path(project_id): Path<ProjectId>,
    Json(body): Json<NewDeposit>,
) -> Result<(StatusCode, Json<DepositRecord>), ApiError> {
    let rls = RlsConnection::new(&state.db, tenant.id()).await?;
    let deposit = TenantScope::new(rls.transaction(), tenant.id())
        .create_deposit(project_id, body)
        .await?;
    rls.commit().await?;

    info!(
        tenant_id = %tenant.id(),
        project_id = %project_id,
        deposit_id = %deposit.id,
        amount = %deposit.amount,
        "Deposit recorded"
    );
    Ok((StatusCode::CREATED, Json(deposit)))
}

async fn delete_deposit(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Path(deposit_id): Path<DepositId>,
) -> Result<StatusCode, ApiError> {
    let rls = RlsConnection::new(&state.db, tenant.id()).await?;
    TenantScope::new(rls.transaction(), tenant.id())
        .delete_deposit(deposit_id)
        .await?;
    rls.commit().await?;

    info!(tenant_id = %tenant.id(), deposit_id = %deposit_id, "Deposit deleted");
    Ok(StatusCode::NO_CONTENT)
}
