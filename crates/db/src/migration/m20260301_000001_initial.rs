//! Initial database migration.
//!
//! Creates the enums, tenant and bookkeeping tables, indexes and row-level
//! security policies.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TENANTS
        // ============================================================
        db.execute_unprepared(TENANTS_SQL).await?;

        // ============================================================
        // PART 3: PROJECTS & CLIENTS
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;

        // ============================================================
        // PART 4: EXPENSES & MATERIALS
        // ============================================================
        db.execute_unprepared(MATERIAL_CATALOG_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;

        // ============================================================
        // PART 5: RECEIPTS & SCHEDULES
        // ============================================================
        db.execute_unprepared(PROJECT_DEPOSITS_SQL).await?;
        db.execute_unprepared(PROJECT_INSTALLMENTS_SQL).await?;
        db.execute_unprepared(PROJECT_DOCUMENTS_SQL).await?;

        // ============================================================
        // PART 6: ASSETS
        // ============================================================
        db.execute_unprepared(ASSETS_SQL).await?;

        // ============================================================
        // PART 7: ROW-LEVEL SECURITY
        // ============================================================
        db.execute_unprepared(RLS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE tenant_status AS ENUM ('TRIAL', 'ACTIVE', 'SUSPENDED', 'EXPIRED');

CREATE TYPE project_status AS ENUM (
    'PLANNING',
    'ACTIVE',
    'ON_HOLD',
    'COMPLETED',
    'CANCELLED'
);

CREATE TYPE expense_category AS ENUM (
    'MATERIAL',
    'LABOR',
    'EQUIPMENT',
    'SUBCONTRACT',
    'OTHER'
);

CREATE TYPE asset_category AS ENUM ('FIXED', 'CURRENT');
";

const TENANTS_SQL: &str = r"
CREATE TABLE tenants (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    subdomain VARCHAR(63) NOT NULL,
    name VARCHAR(255) NOT NULL,
    status tenant_status NOT NULL DEFAULT 'TRIAL',
    subscription_expiry_at TIMESTAMPTZ,
    trial_ends_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ,

    CONSTRAINT chk_subdomain_format CHECK (subdomain ~ '^[a-z0-9]([a-z0-9-]*[a-z0-9])?$')
);

-- Subdomains are unique case-insensitively among live tenants
CREATE UNIQUE INDEX idx_tenants_subdomain_live
    ON tenants (LOWER(subdomain))
    WHERE deleted_at IS NULL;
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    phone VARCHAR(50),
    address TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_clients_tenant ON clients(tenant_id) WHERE deleted_at IS NULL;
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    client_id UUID REFERENCES clients(id),
    name VARCHAR(255) NOT NULL,
    status project_status NOT NULL DEFAULT 'PLANNING',
    budget NUMERIC(20, 2) NOT NULL DEFAULT 0,
    start_date DATE,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ,

    CONSTRAINT chk_budget_non_negative CHECK (budget >= 0)
);

CREATE INDEX idx_projects_tenant ON projects(tenant_id) WHERE deleted_at IS NULL;
CREATE INDEX idx_projects_client ON projects(client_id);
";

const MATERIAL_CATALOG_SQL: &str = r"
CREATE TABLE material_catalog (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name VARCHAR(255) NOT NULL,
    unit VARCHAR(50),
    category VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_material_catalog_tenant ON material_catalog(tenant_id) WHERE deleted_at IS NULL;
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    project_id UUID NOT NULL REFERENCES projects(id),
    category expense_category NOT NULL,
    title VARCHAR(255) NOT NULL,
    quantity NUMERIC(20, 4),
    unit_cost NUMERIC(20, 2),
    amount NUMERIC(20, 2) NOT NULL DEFAULT 0,
    expense_date TIMESTAMP NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_expenses_tenant_date ON expenses(tenant_id, expense_date) WHERE deleted_at IS NULL;
CREATE INDEX idx_expenses_project ON expenses(project_id);

CREATE TABLE expense_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    expense_id UUID NOT NULL REFERENCES expenses(id) ON DELETE CASCADE,
    material_id UUID REFERENCES material_catalog(id),
    material_name VARCHAR(255) NOT NULL,
    quantity NUMERIC(20, 4) NOT NULL,
    unit_price NUMERIC(20, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_expense_items_expense ON expense_items(expense_id);
";

const PROJECT_DEPOSITS_SQL: &str = r"
CREATE TABLE project_deposits (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    project_id UUID NOT NULL REFERENCES projects(id),
    amount NUMERIC(20, 2) NOT NULL,
    paid_at TIMESTAMP NOT NULL,
    receipt_number VARCHAR(100),
    reference VARCHAR(255),
    payment_method VARCHAR(50),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_deposit_positive CHECK (amount > 0)
);

CREATE INDEX idx_project_deposits_tenant_paid ON project_deposits(tenant_id, paid_at);
CREATE INDEX idx_project_deposits_project ON project_deposits(project_id);
";

const PROJECT_INSTALLMENTS_SQL: &str = r"
CREATE TABLE project_installments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    project_id UUID NOT NULL REFERENCES projects(id),
    label VARCHAR(255) NOT NULL,
    amount NUMERIC(20, 2) NOT NULL,
    due_date DATE,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_project_installments_project ON project_installments(project_id, sort_order);
";

const PROJECT_DOCUMENTS_SQL: &str = r"
CREATE TABLE project_documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    project_id UUID NOT NULL REFERENCES projects(id),
    file_name VARCHAR(255) NOT NULL,
    file_url TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_project_documents_project ON project_documents(project_id);
";

const ASSETS_SQL: &str = r"
CREATE TABLE assets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name VARCHAR(255) NOT NULL,
    category asset_category NOT NULL,
    cost NUMERIC(20, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ,

    CONSTRAINT chk_cost_non_negative CHECK (cost >= 0)
);

CREATE INDEX idx_assets_tenant ON assets(tenant_id) WHERE deleted_at IS NULL;
";

pub(super) const RLS_SQL: &str = r"
-- ============================================================
-- ROW-LEVEL SECURITY POLICIES
-- The tenants table stays readable: host resolution runs before any
-- tenant context exists.
-- ============================================================

ALTER TABLE clients ENABLE ROW LEVEL SECURITY;
ALTER TABLE projects ENABLE ROW LEVEL SECURITY;
ALTER TABLE material_catalog ENABLE ROW LEVEL SECURITY;
ALTER TABLE expenses ENABLE ROW LEVEL SECURITY;
ALTER TABLE expense_items ENABLE ROW LEVEL SECURITY;
ALTER TABLE project_deposits ENABLE ROW LEVEL SECURITY;
ALTER TABLE project_installments ENABLE ROW LEVEL SECURITY;
ALTER TABLE project_documents ENABLE ROW LEVEL SECURITY;
ALTER TABLE assets ENABLE ROW LEVEL SECURITY;

-- Application sets context inside a transaction: SET LOCAL app.current_tenant_id = 'tenant-uuid';

CREATE POLICY tenant_isolation ON clients
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON projects
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON material_catalog
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON expenses
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON project_deposits
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON project_installments
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON project_documents
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

CREATE POLICY tenant_isolation ON assets
    USING (tenant_id = current_setting('app.current_tenant_id', true)::UUID);

-- Items are isolated through their expense
CREATE POLICY tenant_isolation ON expense_items
    USING (expense_id IN (
        SELECT id FROM expenses
        WHERE tenant_id = current_setting('app.current_tenant_id', true)::UUID
    ));
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

DROP TABLE IF EXISTS assets CASCADE;
DROP TABLE IF EXISTS project_documents CASCADE;
DROP TABLE IF EXISTS project_installments CASCADE;
DROP TABLE IF EXISTS project_deposits CASCADE;
DROP TABLE IF EXISTS expense_items CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS material_catalog CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS clients CASCADE;
DROP TABLE IF EXISTS tenants CASCADE;

DROP TYPE IF EXISTS asset_category;
DROP TYPE IF EXISTS expense_category;
DROP TYPE IF EXISTS project_status;
DROP TYPE IF EXISTS tenant_status;
";
