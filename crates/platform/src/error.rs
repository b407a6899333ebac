//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Response bodies are deliberately uninformative where the taxonomy demands
//! it: "not found" never distinguishes a domain that never existed from a
//! deactivated tenant, and "access denied" never reveals whether the target
//! tenant exists.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::tenancy::{CredentialError, ScopeError};

/// Application-level error type for the platform.
#[derive(Debug, Error)]
pub enum AppError {
    /// Host did not resolve to an active tenant.
    #[error("tenant not found")]
    TenantNotFound,

    /// No authenticated actor.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated but outside the context's scope.
    #[error("forbidden")]
    Forbidden,

    /// A tenant-specific credential is missing; operator-fixable.
    #[error("credential not configured: {0}")]
    CredentialNotConfigured(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ScopeError> for AppError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::Unauthenticated => Self::Unauthenticated,
            ScopeError::Forbidden => Self::Forbidden,
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::NotConfigured { name, .. } => Self::CredentialNotConfigured(name),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::TenantNotFound => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::CredentialNotConfigured(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::TenantNotFound => "Not found".to_string(),
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::Forbidden => "Access denied".to_string(),
            Self::CredentialNotConfigured(name) => {
                format!("{name} is not set up for this store")
            }
            Self::BadRequest(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
