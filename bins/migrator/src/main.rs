//! Database migration runner for Buildbook.
//!
//! Usage:
//!   migrator up      - Create tables, enums and row-level security policies
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads `DATABASE_URL`. Run it as the table owner: policies apply to the
//! non-owner role the server connects with.

use buildbook_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
