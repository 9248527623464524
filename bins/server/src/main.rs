//! Buildbook API Server
//!
//! Main entry point for the Buildbook backend service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use buildbook_api::{AppState, create_router};
use buildbook_db::connect_with;
use buildbook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buildbook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect_with(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    info!(
        base_domain = %config.tenancy.base_domain,
        allow_slug_header = config.tenancy.allow_slug_header,
        cache_ttl_secs = config.tenancy.cache_ttl_secs,
        "Tenant resolution configured"
    );
    info!(
        project_documents = config.features.project_documents,
        "Optional capabilities"
    );

    let state = AppState::new(
        db,
        config.tenancy,
        config.reports,
        config.features,
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
