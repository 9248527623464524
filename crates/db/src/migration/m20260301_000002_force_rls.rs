//! Forces row-level security on every tenant table.
//!
//! Without FORCE the table owner bypasses the policies. Superusers still
//! bypass them, so the application must connect as a non-superuser role.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(FORCE_RLS_SQL)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(NO_FORCE_RLS_SQL)
            .await?;
        Ok(())
    }
}

const FORCE_RLS_SQL: &str = r"
ALTER TABLE clients FORCE ROW LEVEL SECURITY;
ALTER TABLE projects FORCE ROW LEVEL SECURITY;
ALTER TABLE material_catalog FORCE ROW LEVEL SECURITY;
ALTER TABLE expenses FORCE ROW LEVEL SECURITY;
ALTER TABLE expense_items FORCE ROW LEVEL SECURITY;
ALTER TABLE project_deposits FORCE ROW LEVEL SECURITY;
ALTER TABLE project_installments FORCE ROW LEVEL SECURITY;
ALTER TABLE project_documents FORCE ROW LEVEL SECURITY;
ALTER TABLE assets FORCE ROW LEVEL SECURITY;
";

const NO_FORCE_RLS_SQL: &str = r"
ALTER TABLE clients NO FORCE ROW LEVEL SECURITY;
ALTER TABLE projects NO FORCE ROW LEVEL SECURITY;
ALTER TABLE material_catalog NO FORCE ROW LEVEL SECURITY;
ALTER TABLE expenses NO FORCE ROW LEVEL SECURITY;
ALTER TABLE expense_items NO FORCE ROW LEVEL SECURITY;
ALTER TABLE project_deposits NO FORCE ROW LEVEL SECURITY;
ALTER TABLE project_installments NO FORCE ROW LEVEL SECURITY;
ALTER TABLE project_documents NO FORCE ROW LEVEL SECURITY;
ALTER TABLE assets NO FORCE ROW LEVEL SECURITY;
";
