//! Tests for tenant-scoped data access.
//!
//! SQL built by the scoped query builders must always carry the tenant and
//! soft-delete predicates; writes against ids of another tenant must behave
//! like unknown ids.

use buildbook_core::ledger::{ExpenseCategory, ProjectStatus};
use buildbook_shared::config::FeatureFlags;
use buildbook_shared::types::{DepositId, ExpenseId, MaterialId, ProjectId, TenantId};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, QueryTrait, Select,
};
use uuid::Uuid;

use super::{NewDeposit, ScopeError, TenantScope};
use crate::entities::{
    assets, expense_items, expenses, project_deposits, project_installments, projects,
    sea_orm_active_enums as db_enums,
};

const TENANT: &str = "7d3c1a9e-2f4b-4c8d-9e1f-0a2b3c4d5e6f";

fn tenant() -> TenantId {
    TenantId::from_uuid(Uuid::parse_str(TENANT).unwrap())
}

fn sql<E: sea_orm::EntityTrait>(select: Select<E>) -> String {
    select.build(DatabaseBackend::Postgres).to_string()
}

fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

fn project_model(name: &str) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        tenant_id: tenant().into_inner(),
        client_id: None,
        name: name.to_string(),
        status: db_enums::ProjectStatus::Active,
        budget: dec!(10000),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: None,
        created_at: now(),
        updated_at: now(),
        deleted_at: None,
    }
}

fn expense_model(project_id: Uuid, amount: rust_decimal::Decimal) -> expenses::Model {
    expenses::Model {
        id: Uuid::new_v4(),
        tenant_id: tenant().into_inner(),
        project_id,
        category: db_enums::ExpenseCategory::Material,
        title: "Semen".to_string(),
        quantity: None,
        unit_cost: None,
        amount,
        expense_date: NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        created_at: now(),
        updated_at: now(),
        deleted_at: None,
    }
}

fn deposit_model(project_id: Uuid) -> project_deposits::Model {
    project_deposits::Model {
        id: Uuid::new_v4(),
        tenant_id: tenant().into_inner(),
        project_id,
        amount: dec!(4000),
        paid_at: NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        receipt_number: Some("KW-001".to_string()),
        reference: None,
        payment_method: Some("TRANSFER".to_string()),
        created_at: now(),
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

#[test]
fn test_every_builder_filters_by_tenant() {
    let db = empty_db();
    let scope = TenantScope::new(&db, tenant());
    let tenant_predicate = format!("\"tenant_id\" = '{TENANT}'");

    for query in [
        sql(scope.projects()),
        sql(scope.clients()),
        sql(scope.expenses()),
        sql(scope.expense_items()),
        sql(scope.deposits()),
        sql(scope.installments()),
        sql(scope.assets()),
        sql(scope.materials()),
        sql(scope.documents()),
    ] {
        assert!(query.contains(&tenant_predicate), "{query}");
    }
}

#[test]
fn test_default_queries_exclude_soft_deleted() {
    let db = empty_db();
    let scope = TenantScope::new(&db, tenant());

    for query in [
        sql(scope.projects()),
        sql(scope.clients()),
        sql(scope.assets()),
        sql(scope.materials()),
    ] {
        assert!(query.contains("\"deleted_at\" IS NULL"), "{query}");
    }

    let expenses = sql(scope.expenses());
    assert!(expenses.contains(r#""expenses"."deleted_at" IS NULL"#), "{expenses}");
    assert!(expenses.contains(r#""projects"."deleted_at" IS NULL"#), "{expenses}");

    let items = sql(scope.expense_items());
    assert!(items.contains(r#"INNER JOIN "expenses""#), "{items}");
    assert!(items.contains(r#""expenses"."tenant_id" = "#), "{items}");

    let deposits = sql(scope.deposits());
    assert!(deposits.contains(r#""projects"."deleted_at" IS NULL"#), "{deposits}");
}

#[tokio::test]
async fn test_load_ledger_groups_items_under_expenses() {
    let project = project_model("Gudang");
    let with_items = expense_model(project.id, dec!(0));
    let plain = expense_model(project.id, dec!(250));
    let item = expense_items::Model {
        id: Uuid::new_v4(),
        expense_id: with_items.id,
        material_id: None,
        material_name: "Semen".to_string(),
        quantity: dec!(10),
        unit_price: dec!(55),
        created_at: now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project.clone()]])
        .append_query_results([vec![with_items.clone(), plain.clone()]])
        .append_query_results([vec![item]])
        .append_query_results([vec![deposit_model(project.id)]])
        .append_query_results([Vec::<project_installments::Model>::new()])
        .append_query_results([Vec::<assets::Model>::new()])
        .into_connection();

    let snapshot = TenantScope::new(&db, tenant()).load_ledger().await.unwrap();

    assert_eq!(snapshot.tenant_id, tenant());
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.expenses.len(), 2);
    assert_eq!(snapshot.expenses[0].items.len(), 1);
    assert_eq!(snapshot.expenses[0].total().unwrap(), dec!(550));
    assert_eq!(snapshot.expenses[0].category, ExpenseCategory::Material);
    assert!(snapshot.expenses[1].items.is_empty());
    assert_eq!(snapshot.expenses[1].total().unwrap(), dec!(250));
    assert_eq!(snapshot.deposits[0].amount, dec!(4000));
}

#[tokio::test]
async fn test_load_ledger_propagates_failures() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
        .into_connection();

    let result = TenantScope::new(&db, tenant()).load_ledger().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_foreign_expense_delete_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .into_connection();
    let id = ExpenseId::new();

    let err = TenantScope::new(&db, tenant())
        .soft_delete_expense(id)
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeError::NotFound { entity: "Expense", id: got } if got == id.into_inner()));
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#""tenant_id" = "#), "{log}");
    assert!(log.contains(TENANT), "{log}");
}

#[tokio::test]
async fn test_soft_delete_expense_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1)])
        .into_connection();

    TenantScope::new(&db, tenant())
        .soft_delete_expense(ExpenseId::new())
        .await
        .unwrap();

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#"UPDATE "expenses" SET "deleted_at""#), "{log}");
}

#[tokio::test]
async fn test_project_writes_are_scoped() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0), exec(1), exec(0)])
        .into_connection();
    let scope = TenantScope::new(&db, tenant());

    assert!(matches!(
        scope
            .update_project_status(ProjectId::new(), ProjectStatus::Completed)
            .await,
        Err(ScopeError::NotFound { entity: "Project", .. })
    ));
    scope
        .update_project_status(ProjectId::new(), ProjectStatus::OnHold)
        .await
        .unwrap();
    assert!(matches!(
        scope.soft_delete_project(ProjectId::new()).await,
        Err(ScopeError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_foreign_deposit_delete_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .into_connection();

    let err = TenantScope::new(&db, tenant())
        .delete_deposit(DepositId::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeError::NotFound { entity: "Deposit", .. }));
}

#[tokio::test]
async fn test_create_deposit_rejects_non_positive_amount() {
    let db = empty_db();
    let input = NewDeposit {
        amount: dec!(0),
        paid_at: NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        receipt_number: None,
        reference: None,
        payment_method: None,
    };

    let err = TenantScope::new(&db, tenant())
        .create_deposit(ProjectId::new(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeError::Validation(_)));
}

#[tokio::test]
async fn test_create_deposit_for_foreign_project_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();
    let input = NewDeposit {
        amount: dec!(100),
        paid_at: NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        receipt_number: None,
        reference: None,
        payment_method: None,
    };

    let err = TenantScope::new(&db, tenant())
        .create_deposit(ProjectId::new(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeError::NotFound { entity: "Project", .. }));
}

#[tokio::test]
async fn test_create_deposit_records_tenant() {
    let project = project_model("Gudang");
    let stored = deposit_model(project.id);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project.clone()]])
        .append_query_results([vec![stored.clone()]])
        .into_connection();
    let input = NewDeposit {
        amount: stored.amount,
        paid_at: stored.paid_at,
        receipt_number: stored.receipt_number.clone(),
        reference: None,
        payment_method: stored.payment_method.clone(),
    };

    let deposit = TenantScope::new(&db, tenant())
        .create_deposit(ProjectId::from_uuid(project.id), input)
        .await
        .unwrap();

    assert_eq!(deposit.amount, dec!(4000));
    assert_eq!(deposit.project_id.into_inner(), project.id);
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#"INSERT INTO "project_deposits""#), "{log}");
}

#[tokio::test]
async fn test_unknown_material_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<crate::entities::material_catalog::Model>::new()])
        .into_connection();

    let err = TenantScope::new(&db, tenant())
        .material_name(MaterialId::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeError::NotFound { entity: "Material", .. }));
}

#[tokio::test]
async fn test_project_detail_skips_documents_when_disabled() {
    let project = project_model("Gudang");
    // Three queries only: project, deposits, installments.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project.clone()]])
        .append_query_results([vec![deposit_model(project.id)]])
        .append_query_results([Vec::<project_installments::Model>::new()])
        .into_connection();

    let detail = TenantScope::new(&db, tenant())
        .project_detail(ProjectId::from_uuid(project.id), FeatureFlags::default())
        .await
        .unwrap();

    assert_eq!(detail.project.name, "Gudang");
    assert_eq!(detail.deposits.len(), 1);
    assert!(detail.documents.is_none());
    assert_eq!(db.into_transaction_log().len(), 3);
}
