//! Router tests for tenant resolution and report responses.
//!
//! The database is a `SeaORM` mock: each test appends exactly the results the
//! request is expected to consume, in query order.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use buildbook_api::{AppState, create_router};
use buildbook_db::entities::{
    assets, expense_items, expenses, project_deposits, project_installments, projects,
    sea_orm_active_enums::{ExpenseCategory, ProjectStatus, TenantStatus},
    tenants,
};
use buildbook_shared::config::{FeatureFlags, ReportsConfig, TenancyConfig};
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

fn app(db: DatabaseConnection) -> Router {
    let tenancy = TenancyConfig {
        base_domain: "buildbook.app".to_string(),
        ..TenancyConfig::default()
    };
    create_router(AppState::new(
        db,
        tenancy,
        ReportsConfig::default(),
        FeatureFlags::default(),
    ))
}

fn tenant(status: TenantStatus) -> tenants::Model {
    let now = Utc::now().into();
    tenants::Model {
        id: Uuid::new_v4(),
        subdomain: "acme".to_string(),
        name: "Acme Konstruksi".to_string(),
        status,
        subscription_expiry_at: None,
        trial_ends_at: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn get(uri: &str, host: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

fn set_tenant() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 0,
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_unknown_subdomain_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<tenants::Model>::new()])
        .into_connection();

    let (status, body) = send(app(db), get("/api/v1/dashboard", "ghost.buildbook.app")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "tenant_not_found");
}

#[tokio::test]
async fn test_suspended_tenant_is_403() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tenant(TenantStatus::Suspended)]])
        .into_connection();

    let (status, body) = send(app(db), get("/api/v1/dashboard", "acme.buildbook.app")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "tenant_suspended");
}

#[tokio::test]
async fn test_lapsed_trial_is_403() {
    let mut model = tenant(TenantStatus::Trial);
    model.trial_ends_at = Some((Utc::now() - chrono::Duration::days(1)).into());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let (status, _) = send(app(db), get("/api/v1/dashboard", "acme.buildbook.app")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_platform_host_has_no_tenant_routes() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let (status, body) = send(app(db), get("/api/v1/dashboard", "buildbook.app")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tenant_required");
}

#[tokio::test]
async fn test_foreign_host_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let (status, _) = send(app(db), get("/api/v1/dashboard", "acme.example.com")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slug_header_ignored_unless_enabled() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let request = Request::builder()
        .uri("/api/v1/dashboard")
        .header("host", "buildbook.app")
        .header("x-tenant-slug", "acme")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(db), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_without_period_awaits_input() {
    // Only the tenant lookup runs; no ledger query is issued.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tenant(TenantStatus::Active)]])
        .into_connection();

    let (status, body) = send(
        app(db),
        get("/api/v1/reports/balance-sheet?from=2024-01&to=", "acme.buildbook.app"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "awaiting_period" }));
}

#[tokio::test]
async fn test_invalid_period_is_422() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tenant(TenantStatus::Active)]])
        .into_connection();

    let (status, body) = send(
        app(db),
        get(
            "/api/v1/reports/profit-loss?from=2024-05&to=2024-01",
            "acme.buildbook.app",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_period");
}

#[tokio::test]
async fn test_unknown_category_is_400() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tenant(TenantStatus::Active)]])
        .into_connection();

    let (status, body) = send(
        app(db),
        get(
            "/api/v1/reports/financial?from=2024-01&to=2024-01&category=CONCRETE",
            "acme.buildbook.app",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_balance_sheet_ready() {
    let owner = tenant(TenantStatus::Active);
    let now = Utc::now().into();
    let project = projects::Model {
        id: Uuid::new_v4(),
        tenant_id: owner.id,
        client_id: None,
        name: "Ruko Blok A".to_string(),
        status: ProjectStatus::Active,
        budget: dec!(10000),
        start_date: None,
        end_date: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    let expense = expenses::Model {
        id: Uuid::new_v4(),
        tenant_id: owner.id,
        project_id: project.id,
        category: ExpenseCategory::Labor,
        title: "Upah tukang".to_string(),
        quantity: None,
        unit_cost: None,
        amount: dec!(3000),
        expense_date: NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    let deposit = project_deposits::Model {
        id: Uuid::new_v4(),
        tenant_id: owner.id,
        project_id: project.id,
        amount: dec!(4000),
        paid_at: NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        receipt_number: None,
        reference: None,
        payment_method: None,
        created_at: now,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![owner]])
        .append_exec_results([set_tenant()])
        .append_query_results([vec![project]])
        .append_query_results([vec![expense]])
        .append_query_results([Vec::<expense_items::Model>::new()])
        .append_query_results([vec![deposit]])
        .append_query_results([Vec::<project_installments::Model>::new()])
        .append_query_results([Vec::<assets::Model>::new()])
        .into_connection();

    let (status, body) = send(
        app(db),
        get(
            "/api/v1/reports/balance-sheet?from=2024-01&to=2024-03",
            "acme.buildbook.app",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["report"]["receivables"], "6000");
    assert_eq!(body["report"]["total_assets"], "10000");
    assert_eq!(body["report"]["net_position"], "7000");
}

#[tokio::test]
async fn test_oversized_expense_item_is_500() {
    let owner = tenant(TenantStatus::Active);
    let now = Utc::now().into();
    let huge = rust_decimal::Decimal::from(1_000_000_000_000_000_i64);
    let project = projects::Model {
        id: Uuid::new_v4(),
        tenant_id: owner.id,
        client_id: None,
        name: "Gudang".to_string(),
        status: ProjectStatus::Active,
        budget: dec!(0),
        start_date: None,
        end_date: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    let expense = expenses::Model {
        id: Uuid::new_v4(),
        tenant_id: owner.id,
        project_id: project.id,
        category: ExpenseCategory::Material,
        title: "Semen".to_string(),
        quantity: None,
        unit_cost: None,
        amount: dec!(0),
        expense_date: NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    let item = expense_items::Model {
        id: Uuid::new_v4(),
        expense_id: expense.id,
        material_id: None,
        material_name: "Semen".to_string(),
        quantity: huge,
        unit_price: huge,
        created_at: now,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![owner]])
        .append_exec_results([set_tenant()])
        .append_query_results([vec![project]])
        .append_query_results([vec![expense]])
        .append_query_results([vec![item]])
        .append_query_results([Vec::<project_deposits::Model>::new()])
        .append_query_results([Vec::<project_installments::Model>::new()])
        .append_query_results([Vec::<assets::Model>::new()])
        .into_connection();

    let (status, body) = send(
        app(db),
        get(
            "/api/v1/reports/profit-loss?from=2024-01&to=2024-01",
            "acme.buildbook.app",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "An error occurred");
}

#[tokio::test]
async fn test_foreign_expense_delete_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tenant(TenantStatus::Active)]])
        .append_exec_results([
            set_tenant(),
            // UPDATE matching (id, tenant): nothing
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/expenses/{}", Uuid::new_v4()))
        .header("host", "acme.buildbook.app")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(db), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_health_needs_no_tenant() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let (status, body) = send(app(db), get("/api/v1/health", "buildbook.app")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
