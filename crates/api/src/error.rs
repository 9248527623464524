//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buildbook_core::ledger::UnknownCategory;
use buildbook_core::period::PeriodError;
use buildbook_core::tenant::TenantError;
use buildbook_db::repositories::{ReportError, ScopeError, TenantLookupError};
use buildbook_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// An error rendered as `{ "error": code, "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.error_code().to_ascii_lowercase();

        let message = if self.0.is_recoverable() {
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<TenantError> for ApiError {
    fn from(err: TenantError) -> Self {
        Self(match err {
            TenantError::NotFound(_) => AppError::TenantNotFound(err.to_string()),
            TenantError::Suspended { .. } => AppError::TenantSuspended(err.to_string()),
        })
    }
}

impl From<TenantLookupError> for ApiError {
    fn from(err: TenantLookupError) -> Self {
        match err {
            TenantLookupError::NotFound(subdomain) => TenantError::NotFound(subdomain).into(),
            TenantLookupError::Database(e) => e.into(),
        }
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        Self(AppError::InvalidPeriod(err.to_string()))
    }
}

impl From<UnknownCategory> for ApiError {
    fn from(err: UnknownCategory) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<ScopeError> for ApiError {
    fn from(err: ScopeError) -> Self {
        Self(match err {
            ScopeError::NotFound { .. } => AppError::NotFound(err.to_string()),
            ScopeError::Validation(msg) => AppError::Validation(msg),
            ScopeError::Database(e) => AppError::Database(e.to_string()),
        })
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(match err {
            ReportError::NotFound(msg) => AppError::NotFound(msg),
            ReportError::Ledger(e) => AppError::Internal(e.to_string()),
            ReportError::Database(e) => AppError::Database(e.to_string()),
        })
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildbook_core::ledger::LedgerError;
    use buildbook_core::tenant::TenantStatus;
    use http_body_util::BodyExt;
    use uuid::Uuid;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_period_is_unprocessable() {
        let err: ApiError = PeriodError::Unparseable {
            field: "from",
            value: "2024-13".to_string(),
        }
        .into();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_period");
    }

    #[tokio::test]
    async fn test_suspended_differs_from_not_found() {
        let suspended: ApiError = TenantError::Suspended {
            subdomain: "acme".to_string(),
            status: TenantStatus::Suspended,
        }
        .into();
        let missing: ApiError = TenantError::NotFound("acme".to_string()).into();

        assert_eq!(suspended.status(), StatusCode::FORBIDDEN);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_database_errors_hide_details() {
        let err: ApiError = DbErr::Custom("password=hunter2".to_string()).into();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "database_error");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_cross_tenant_id_reads_as_not_found() {
        let err: ApiError = ScopeError::NotFound {
            entity: "Expense",
            id: Uuid::nil(),
        }
        .into();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_report_overflow_is_internal() {
        let err: ApiError = ReportError::Ledger(LedgerError::Overflow("item amount")).into();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "An error occurred");
    }
}
