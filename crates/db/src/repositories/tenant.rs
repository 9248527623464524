//! Tenant lookup by subdomain, with a short-lived cache.

use std::sync::Arc;
use std::time::Duration;

use buildbook_core::tenant::{HostResolver, Tenant, TenantSelector};
use buildbook_shared::config::TenancyConfig;
use moka::future::Cache;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Select};
use tracing::debug;

use crate::entities::tenants;

/// Error types for tenant lookups.
#[derive(Debug, thiserror::Error)]
pub enum TenantLookupError {
    /// No live tenant has this subdomain.
    #[error("Tenant not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Tenant repository. Reads are platform-level: no tenant context applies.
#[derive(Debug, Clone)]
pub struct TenantRepository {
    db: Arc<DatabaseConnection>,
}

impl TenantRepository {
    /// Creates a new tenant repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Query for the live tenant with `subdomain`, compared case-insensitively.
    #[must_use]
    pub fn by_subdomain(subdomain: &str) -> Select<tenants::Entity> {
        tenants::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    tenants::Entity,
                    tenants::Column::Subdomain,
                ))))
                .eq(subdomain.trim().to_lowercase()),
            )
            .filter(tenants::Column::DeletedAt.is_null())
    }

    /// Finds the live tenant with `subdomain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DbErr> {
        Ok(Self::by_subdomain(subdomain)
            .one(self.db.as_ref())
            .await?
            .map(Tenant::from))
    }
}

/// Resolves request hosts to tenants.
///
/// Lookups (including misses) are cached per lower-case subdomain for
/// `tenancy.cache_ttl_secs`.
#[derive(Clone)]
pub struct TenantDirectory {
    repo: TenantRepository,
    resolver: HostResolver,
    cache: Cache<String, Option<Tenant>>,
}

impl TenantDirectory {
    /// Creates a directory for the configured base domain.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, config: &TenancyConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Self {
            repo: TenantRepository::new(db),
            resolver: HostResolver::new(&config.base_domain),
            cache,
        }
    }

    /// Returns the host resolver.
    #[must_use]
    pub const fn resolver(&self) -> &HostResolver {
        &self.resolver
    }

    /// Resolves a selector. `Ok(None)` means the platform surface.
    ///
    /// # Errors
    ///
    /// Returns [`TenantLookupError::NotFound`] when no live tenant matches.
    pub async fn resolve(
        &self,
        selector: &TenantSelector,
    ) -> Result<Option<Tenant>, TenantLookupError> {
        match selector {
            TenantSelector::Platform => Ok(None),
            TenantSelector::Subdomain(subdomain) => self.lookup(subdomain).await.map(Some),
        }
    }

    /// Finds the live tenant with `subdomain`.
    ///
    /// # Errors
    ///
    /// Returns [`TenantLookupError::NotFound`] when no live tenant matches, or
    /// a database error.
    pub async fn lookup(&self, subdomain: &str) -> Result<Tenant, TenantLookupError> {
        let key = subdomain.trim().to_lowercase();

        let found = if let Some(cached) = self.cache.get(&key).await {
            cached
        } else {
            let found = self.repo.find_by_subdomain(&key).await?;
            debug!(subdomain = %key, found = found.is_some(), "Tenant lookup");
            self.cache.insert(key.clone(), found.clone()).await;
            found
        };

        found.ok_or(TenantLookupError::NotFound(key))
    }

    /// Drops a cached lookup, e.g. after a status change.
    pub async fn invalidate(&self, subdomain: &str) {
        self.cache.invalidate(&subdomain.trim().to_lowercase()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::TenantStatus;
    use buildbook_core::tenant::TenantStatus as CoreStatus;
    use proptest::prelude::*;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};
    use uuid::Uuid;

    fn config() -> TenancyConfig {
        TenancyConfig {
            base_domain: "buildbook.app".to_string(),
            ..TenancyConfig::default()
        }
    }

    fn model(subdomain: &str) -> tenants::Model {
        let now = chrono::Utc::now().into();
        tenants::Model {
            id: Uuid::new_v4(),
            subdomain: subdomain.to_string(),
            name: "Acme Konstruksi".to_string(),
            status: TenantStatus::Active,
            subscription_expiry_at: None,
            trial_ends_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_subdomain_query_is_case_insensitive_and_live_only() {
        let sql = TenantRepository::by_subdomain(" ACME ")
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"LOWER("tenants"."subdomain") = 'acme'"#), "{sql}");
        assert!(sql.contains(r#""tenants"."deleted_at" IS NULL"#), "{sql}");
    }

    #[tokio::test]
    async fn test_lookup_is_cached() {
        // One result only: a second query would fail the mock.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("acme")]])
            .into_connection();
        let directory = TenantDirectory::new(Arc::new(db), &config());

        let first = directory.lookup("acme").await.unwrap();
        let second = directory.lookup("ACME").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.status, CoreStatus::Active);
    }

    #[tokio::test]
    async fn test_unknown_subdomain_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tenants::Model>::new()])
            .into_connection();
        let directory = TenantDirectory::new(Arc::new(db), &config());

        let err = directory.lookup("ghost").await.unwrap_err();
        assert!(matches!(err, TenantLookupError::NotFound(s) if s == "ghost"));
    }

    #[tokio::test]
    async fn test_platform_selector_skips_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let directory = TenantDirectory::new(Arc::new(db), &config());

        assert!(
            directory
                .resolve(&TenantSelector::Platform)
                .await
                .unwrap()
                .is_none()
        );
    }

    proptest! {
        /// Casing and surrounding whitespace never change the lookup query.
        #[test]
        fn prop_subdomain_query_ignores_case(sub in "[a-z0-9]{1,20}") {
            let upper = format!("  {}  ", sub.to_uppercase());
            let expected = TenantRepository::by_subdomain(&sub)
                .build(DatabaseBackend::Postgres)
                .to_string();
            let actual = TenantRepository::by_subdomain(&upper)
                .build(DatabaseBackend::Postgres)
                .to_string();
            prop_assert_eq!(actual, expected);
        }
    }
}
