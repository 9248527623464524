//! Row-Level Security (RLS) context management.
//!
//! Tenant writes run inside a transaction that carries the tenant id in the
//! `PostgreSQL` setting `app.current_tenant_id`, so the RLS policies created
//! by the initial migration apply in addition to the explicit tenant filters.
//!
//! # Usage
//!
//! ```ignore
//! use buildbook_db::rls::RlsConnection;
//!
//! let rls = RlsConnection::new(&db, tenant_id).await?;
//! let scope = TenantScope::new(rls.transaction(), tenant_id);
//! scope.soft_delete_expense(expense_id).await?;
//! rls.commit().await?;
//! ```

use buildbook_shared::types::TenantId;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// A database transaction with the tenant RLS context set.
pub struct RlsConnection {
    txn: DatabaseTransaction,
    tenant_id: TenantId,
}

impl RlsConnection {
    /// Begins a transaction and sets `app.current_tenant_id` with `SET LOCAL`,
    /// which scopes the setting to this transaction only.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the RLS
    /// context cannot be set.
    pub async fn new(db: &DatabaseConnection, tenant_id: TenantId) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        set_rls_context(&txn, tenant_id).await?;
        Ok(Self { txn, tenant_id })
    }

    /// Returns the underlying transaction for executing queries.
    #[must_use]
    pub const fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Returns the tenant this transaction is bound to.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Commits the transaction, persisting all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the transaction, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

/// Extension trait for `DatabaseConnection` to easily create RLS-enabled connections.
#[async_trait::async_trait]
pub trait RlsExt {
    /// Creates an RLS-enabled transaction for `tenant_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the RLS connection cannot be created.
    async fn with_rls(&self, tenant_id: TenantId) -> Result<RlsConnection, DbErr>;
}

#[async_trait::async_trait]
impl RlsExt for DatabaseConnection {
    async fn with_rls(&self, tenant_id: TenantId) -> Result<RlsConnection, DbErr> {
        RlsConnection::new(self, tenant_id).await
    }
}

/// Sets the RLS context on an existing transaction.
///
/// # Errors
///
/// Returns an error if the RLS context cannot be set.
pub async fn set_rls_context(txn: &DatabaseTransaction, tenant_id: TenantId) -> Result<(), DbErr> {
    txn.execute_unprepared(&rls_statement(tenant_id)).await?;
    Ok(())
}

// `SET` takes no bind parameters; the id is a formatted UUID.
fn rls_statement(tenant_id: TenantId) -> String {
    format!("SET LOCAL app.current_tenant_id = '{tenant_id}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn tenant() -> TenantId {
        TenantId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap())
    }

    #[test]
    fn test_rls_sql_format() {
        assert_eq!(
            rls_statement(tenant()),
            "SET LOCAL app.current_tenant_id = '550e8400-e29b-41d4-a716-446655440000'"
        );
    }

    #[tokio::test]
    async fn test_rls_connection_sets_context_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let rls = RlsConnection::new(&db, tenant()).await.unwrap();
        assert_eq!(rls.tenant_id(), tenant());
        rls.commit().await.unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        let begin = log.find("BEGIN").unwrap();
        let set = log
            .find("SET LOCAL app.current_tenant_id = '550e8400-e29b-41d4-a716-446655440000'")
            .unwrap();
        let commit = log.find("COMMIT").unwrap();
        assert!(begin < set && set < commit);
    }
}
