//! Tenant resolution middleware for workspace routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Uri, header::HOST, request::Parts, uri::Authority},
    middleware::Next,
    response::{IntoResponse, Response},
};
use buildbook_core::tenant::{HostResolver, Tenant, TenantError, TenantSelector};
use buildbook_shared::AppError;
use buildbook_shared::types::TenantId;
use chrono::Utc;
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Header naming a tenant explicitly, honored only when enabled in config.
pub const TENANT_SLUG_HEADER: &str = "x-tenant-slug";

/// The tenant a request runs for, resolved once by [`tenant_middleware`].
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// The resolved, accessible tenant.
    pub tenant: Tenant,
}

/// Tenant middleware.
///
/// This middleware:
/// 1. Derives a selector from the `X-Tenant-Slug` header (when allowed) or the host
/// 2. Resolves it through the cached tenant directory
/// 3. Rejects tenants whose subscription does not allow access
/// 4. Stores a [`TenantContext`] in request extensions
///
/// Platform hosts pass through without a context; handlers that need a
/// tenant reject them through [`CurrentTenant`].
pub async fn tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve(&state, request.headers(), request.uri()).await {
        Ok(Some(tenant)) => {
            request.extensions_mut().insert(TenantContext { tenant });
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

async fn resolve(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<Option<Tenant>, ApiError> {
    let selector = selector(
        state.tenants.resolver(),
        state.tenancy.allow_slug_header,
        headers,
        uri,
    )?;

    let Some(tenant) = state.tenants.resolve(&selector).await? else {
        return Ok(None);
    };

    tenant.ensure_access(Utc::now())?;
    debug!(tenant_id = %tenant.id, subdomain = %tenant.subdomain, "Tenant resolved");
    Ok(Some(tenant))
}

fn selector(
    resolver: &HostResolver,
    allow_slug_header: bool,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<TenantSelector, TenantError> {
    if allow_slug_header
        && let Some(slug) = headers
            .get(TENANT_SLUG_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.trim().is_empty())
    {
        return HostResolver::select_slug(slug);
    }

    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(Authority::as_str))
        .unwrap_or_default();

    resolver.select(host)
}

/// Extractor for the current tenant.
///
/// ```ignore
/// async fn handler(tenant: CurrentTenant) -> impl IntoResponse {
///     let tenant_id = tenant.id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub Tenant);

impl CurrentTenant {
    /// Returns the tenant id.
    #[must_use]
    pub const fn id(&self) -> TenantId {
        self.0.id
    }

    /// Returns the tenant.
    #[must_use]
    pub const fn tenant(&self) -> &Tenant {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .map(|ctx| Self(ctx.tenant.clone()))
            .ok_or_else(|| {
                ApiError(AppError::TenantRequired(
                    "This endpoint is only available on a tenant workspace".to_string(),
                ))
            })
    }
}
