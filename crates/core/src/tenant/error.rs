//! Tenant error types.

use thiserror::Error;

use super::types::TenantStatus;

/// Errors raised while establishing the tenant context of a request.
///
/// Both variants are expected conditions rendered as dedicated responses,
/// not system failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantError {
    /// No live tenant matches the requested workspace.
    #[error("No workspace found for '{0}'")]
    NotFound(String),

    /// The tenant exists but its subscription does not allow access.
    #[error("Workspace '{subdomain}' is not accessible (status {status})")]
    Suspended {
        /// Subdomain of the tenant.
        subdomain: String,
        /// Status at the time of the check.
        status: TenantStatus,
    },
}
