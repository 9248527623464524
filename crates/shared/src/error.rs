//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// No tenant is registered for the requested workspace.
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    /// The tenant exists but its subscription does not allow access.
    #[error("Tenant suspended: {0}")]
    TenantSuspended(String),

    /// The request did not carry a tenant context.
    #[error("Tenant required: {0}")]
    TenantRequired(String),

    /// Resource not found (also returned for ids owned by another tenant).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested reporting period is unparseable or reversed.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::TenantNotFound(_) | Self::NotFound(_) => 404,
            Self::TenantSuspended(_) => 403,
            Self::TenantRequired(_) | Self::Validation(_) => 400,
            Self::InvalidPeriod(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TenantNotFound(_) => "TENANT_NOT_FOUND",
            Self::TenantSuspended(_) => "TENANT_SUSPENDED",
            Self::TenantRequired(_) => "TENANT_REQUIRED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for expected, user-facing conditions that are not system failures.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
