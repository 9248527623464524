//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for reports, the dashboard and project bookkeeping
//! - Tenant resolution middleware and the `CurrentTenant` extractor
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use buildbook_db::TenantDirectory;
use buildbook_shared::config::{FeatureFlags, ReportsConfig, TenancyConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Cached host to tenant resolution.
    pub tenants: Arc<TenantDirectory>,
    /// Tenant resolution settings.
    pub tenancy: Arc<TenancyConfig>,
    /// Report settings.
    pub reports: ReportsConfig,
    /// Optional capabilities, decided once at startup.
    pub features: FeatureFlags,
}

impl AppState {
    /// Builds the state from a connection and configuration sections.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        tenancy: TenancyConfig,
        reports: ReportsConfig,
        features: FeatureFlags,
    ) -> Self {
        let db = Arc::new(db);
        let tenants = TenantDirectory::new(Arc::clone(&db), &tenancy);
        Self {
            db,
            tenants: Arc::new(tenants),
            tenancy: Arc::new(tenancy),
            reports,
            features,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
