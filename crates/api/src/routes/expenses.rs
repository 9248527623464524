//! Expense routes.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
};
use buildbook_db::{RlsConnection, TenantScope};
use buildbook_shared::types::ExpenseId;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::CurrentTenant};

/// Creates the expense routes (requires tenant middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/expenses/{expense_id}", delete(delete_expense))
}

/// Soft-deletes an expense. Ids of other tenants answer 404.
async fn delete_expense(
    State(state): State<AppState>,
    tenant: CurrentTenant,
    Path(expense_id): Path<ExpenseId>,
) -> Result<StatusCode, ApiError> {
    let rls = RlsConnection::new(&state.db, tenant.id()).await?;
    TenantScope::new(rls.transaction(), tenant.id())
        .soft_delete_expense(expense_id)
        .await?;
    rls.commit().await?;

    info!(tenant_id = %tenant.id(), expense_id = %expense_id, "Expense deleted");
    Ok(StatusCode::NO_CONTENT)
}
