//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::tenant_middleware};

pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod projects;
pub mod reports;

/// Creates the API router. Everything except the health check runs behind
/// the tenant middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let tenant_routes = Router::new()
        .merge(reports::routes())
        .merge(dashboard::routes())
        .merge(projects::routes())
        .merge(expenses::routes())
        .layer(middleware::from_fn_with_state(state, tenant_middleware));

    Router::new().merge(health::routes()).merge(tenant_routes)
}
