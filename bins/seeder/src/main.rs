//! Database seeder for Buildbook development and testing.
//!
//! Seeds a demo tenant (`demo.<base domain>`) with a client, a material
//! catalog, two projects, itemized and plain expenses, deposits, an
//! installment schedule and assets.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use buildbook_db::entities::{
    assets, clients, expense_items, expenses, material_catalog, project_deposits,
    project_installments, projects,
    sea_orm_active_enums::{AssetCategory, ExpenseCategory, ProjectStatus, TenantStatus},
    tenants,
};
use buildbook_db::rls::set_rls_context;
use buildbook_shared::types::TenantId;

/// Demo tenant ID (consistent for all seeds)
const DEMO_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo tenant subdomain
const DEMO_SUBDOMAIN: &str = "demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = buildbook_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let tenant_id = Uuid::parse_str(DEMO_TENANT_ID)?;
    if tenants::Entity::find_by_id(tenant_id).one(&db).await?.is_some() {
        println!("  Demo tenant already exists, skipping...");
        return Ok(());
    }

    let txn = db.begin().await?;
    set_rls_context(&txn, TenantId::from_uuid(tenant_id)).await?;

    println!("Seeding demo tenant...");
    seed_tenant(&txn, tenant_id).await?;

    println!("Seeding client and material catalog...");
    let client_id = seed_client(&txn, tenant_id).await?;
    let materials = seed_materials(&txn, tenant_id).await?;

    println!("Seeding projects...");
    let shophouse = seed_project(
        &txn,
        tenant_id,
        Some(client_id),
        "Ruko Blok A",
        ProjectStatus::Active,
        dec!(850000000),
        date(2024, 1, 8),
    )
    .await?;
    let warehouse = seed_project(
        &txn,
        tenant_id,
        None,
        "Gudang Cikarang",
        ProjectStatus::Planning,
        dec!(420000000),
        date(2024, 3, 1),
    )
    .await?;

    println!("Seeding expenses...");
    seed_itemized_expense(
        &txn,
        tenant_id,
        shophouse,
        "Material pondasi",
        at(2024, 1, 15),
        &[
            (materials[0], "Semen Portland", dec!(120), dec!(65000)),
            (materials[1], "Pasir beton", dec!(18), dec!(310000)),
            (materials[2], "Besi beton 12mm", dec!(240), dec!(98000)),
        ],
    )
    .await?;
    seed_expense(
        &txn,
        tenant_id,
        shophouse,
        ExpenseCategory::Labor,
        "Upah tukang minggu 1-4",
        dec!(36000000),
        at(2024, 1, 31),
    )
    .await?;
    seed_expense(
        &txn,
        tenant_id,
        shophouse,
        ExpenseCategory::Equipment,
        "Sewa molen",
        dec!(4500000),
        at(2024, 2, 10),
    )
    .await?;
    seed_expense(
        &txn,
        tenant_id,
        warehouse,
        ExpenseCategory::Subcontract,
        "Pengukuran lahan",
        dec!(12000000),
        at(2024, 3, 5),
    )
    .await?;

    println!("Seeding deposits and installments...");
    seed_deposit(&txn, tenant_id, shophouse, dec!(255000000), at(2024, 1, 10), "KW-0001").await?;
    seed_deposit(&txn, tenant_id, shophouse, dec!(170000000), at(2024, 3, 12), "KW-0002").await?;
    seed_deposit(&txn, tenant_id, warehouse, dec!(84000000), at(2024, 3, 2), "KW-0003").await?;
    for (order, (label, amount, due)) in [
        ("DP 30%", dec!(255000000), date(2024, 1, 10)),
        ("Termin 1 (20%)", dec!(170000000), date(2024, 3, 10)),
        ("Termin 2 (30%)", dec!(255000000), date(2024, 6, 10)),
        ("Pelunasan", dec!(170000000), date(2024, 9, 10)),
    ]
    .into_iter()
    .enumerate()
    {
        seed_installment(&txn, tenant_id, shophouse, label, amount, due, order).await?;
    }

    println!("Seeding assets...");
    seed_asset(&txn, tenant_id, "Mobil pick-up", AssetCategory::Fixed, dec!(210000000)).await?;
    seed_asset(&txn, tenant_id, "Stok besi gudang", AssetCategory::Current, dec!(18500000)).await?;

    txn.commit().await?;
    println!("Seeding complete! Open http://{DEMO_SUBDOMAIN}.localhost:8080/api/v1/dashboard");

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(9, 0, 0)
        .unwrap_or_default()
}

/// Seeds the demo tenant with a year of subscription.
async fn seed_tenant(txn: &DatabaseTransaction, tenant_id: Uuid) -> anyhow::Result<()> {
    tenants::ActiveModel {
        id: Set(tenant_id),
        subdomain: Set(DEMO_SUBDOMAIN.to_string()),
        name: Set("Demo Konstruksi".to_string()),
        status: Set(TenantStatus::Active),
        subscription_expiry_at: Set(Some((Utc::now() + Duration::days(365)).into())),
        trial_ends_at: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
        deleted_at: Set(None),
    }
    .insert(txn)
    .await?;
    println!("  Created tenant: {DEMO_SUBDOMAIN}");
    Ok(())
}

async fn seed_client(txn: &DatabaseTransaction, tenant_id: Uuid) -> anyhow::Result<Uuid> {
    let id = Uuid::now_v7();
    clients::ActiveModel {
        id: Set(id),
        tenant_id: Set(tenant_id),
        name: Set("PT Sinar Properti".to_string()),
        email: Set(Some("proyek@sinarproperti.test".to_string())),
        phone: Set(Some("+62 21 555 0100".to_string())),
        address: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
        deleted_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(id)
}

async fn seed_materials(txn: &DatabaseTransaction, tenant_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
    let mut ids = Vec::new();
    for (name, unit) in [
        ("Semen Portland", "sak"),
        ("Pasir beton", "m3"),
        ("Besi beton 12mm", "batang"),
    ] {
        let id = Uuid::now_v7();
        material_catalog::ActiveModel {
            id: Set(id),
            tenant_id: Set(tenant_id),
            name: Set(name.to_string()),
            unit: Set(Some(unit.to_string())),
            category: Set(Some("Struktur".to_string())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
            deleted_at: Set(None),
        }
        .insert(txn)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn seed_project(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    client_id: Option<Uuid>,
    name: &str,
    status: ProjectStatus,
    budget: Decimal,
    start_date: NaiveDate,
) -> anyhow::Result<Uuid> {
    let id = Uuid::now_v7();
    projects::ActiveModel {
        id: Set(id),
        tenant_id: Set(tenant_id),
        client_id: Set(client_id),
        name: Set(name.to_string()),
        status: Set(status),
        budget: Set(budget),
        start_date: Set(Some(start_date)),
        end_date: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
        deleted_at: Set(None),
    }
    .insert(txn)
    .await?;
    println!("  Created project: {name}");
    Ok(id)
}

async fn seed_expense(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    project_id: Uuid,
    category: ExpenseCategory,
    title: &str,
    amount: Decimal,
    expense_date: NaiveDateTime,
) -> anyhow::Result<Uuid> {
    let id = Uuid::now_v7();
    expenses::ActiveModel {
        id: Set(id),
        tenant_id: Set(tenant_id),
        project_id: Set(project_id),
        category: Set(category),
        title: Set(title.to_string()),
        quantity: Set(None),
        unit_cost: Set(None),
        amount: Set(amount),
        expense_date: Set(expense_date),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
        deleted_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(id)
}

/// Seeds a material expense whose amount is the sum of its items.
async fn seed_itemized_expense(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    project_id: Uuid,
    title: &str,
    expense_date: NaiveDateTime,
    items: &[(Uuid, &str, Decimal, Decimal)],
) -> anyhow::Result<()> {
    let amount = items.iter().map(|(_, _, qty, price)| qty * price).sum();
    let expense_id = seed_expense(
        txn,
        tenant_id,
        project_id,
        ExpenseCategory::Material,
        title,
        amount,
        expense_date,
    )
    .await?;

    for (material_id, name, quantity, unit_price) in items {
        expense_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            expense_id: Set(expense_id),
            material_id: Set(Some(*material_id)),
            material_name: Set((*name).to_string()),
            quantity: Set(*quantity),
            unit_price: Set(*unit_price),
            created_at: Set(Utc::now().into()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

async fn seed_deposit(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    project_id: Uuid,
    amount: Decimal,
    paid_at: NaiveDateTime,
    receipt_number: &str,
) -> anyhow::Result<()> {
    project_deposits::ActiveModel {
        id: Set(Uuid::now_v7()),
        tenant_id: Set(tenant_id),
        project_id: Set(project_id),
        amount: Set(amount),
        paid_at: Set(paid_at),
        receipt_number: Set(Some(receipt_number.to_string())),
        reference: Set(None),
        payment_method: Set(Some("TRANSFER".to_string())),
        created_at: Set(Utc::now().into()),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn seed_installment(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    project_id: Uuid,
    label: &str,
    amount: Decimal,
    due_date: NaiveDate,
    sort_order: usize,
) -> anyhow::Result<()> {
    project_installments::ActiveModel {
        id: Set(Uuid::now_v7()),
        tenant_id: Set(tenant_id),
        project_id: Set(project_id),
        label: Set(label.to_string()),
        amount: Set(amount),
        due_date: Set(Some(due_date)),
        sort_order: Set(i32::try_from(sort_order)?),
        created_at: Set(Utc::now().into()),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn seed_asset(
    txn: &DatabaseTransaction,
    tenant_id: Uuid,
    name: &str,
    category: AssetCategory,
    cost: Decimal,
) -> anyhow::Result<()> {
    assets::ActiveModel {
        id: Set(Uuid::now_v7()),
        tenant_id: Set(tenant_id),
        name: Set(name.to_string()),
        category: Set(category),
        cost: Set(cost),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
        deleted_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}
