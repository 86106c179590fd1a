//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account not found
    #[error("Account not found")]
    AccountNotFound,

    /// No valid session on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Session token malformed, expired, or tampered with
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Another request created the account for this identity first.
    /// Handled inside the reconciler by re-reading; never reaches a client.
    #[error("Account already exists for this identity")]
    DuplicateIdentity,

    /// Request payload failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Upload content type is not an accepted image format
    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    /// Upload exceeds the image size limit
    #[error("Image exceeds the maximum allowed size")]
    ImageTooLarge,

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::AccountNotFound => StatusCode::NOT_FOUND,
            AccountError::Unauthenticated | AccountError::SessionInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::DuplicateIdentity => StatusCode::CONFLICT,
            AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::UnsupportedImageType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AccountError::ImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AccountError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::AccountNotFound => ErrorKind::NotFound,
            AccountError::Unauthenticated | AccountError::SessionInvalid => ErrorKind::Unauthorized,
            AccountError::DuplicateIdentity => ErrorKind::Conflict,
            AccountError::Validation(_) => ErrorKind::BadRequest,
            AccountError::UnsupportedImageType(_) => ErrorKind::UnsupportedMediaType,
            AccountError::ImageTooLarge => ErrorKind::PayloadTooLarge,
            AccountError::Storage(_) => ErrorKind::ServiceUnavailable,
            AccountError::Database(_) | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Storage(_) => AppError::new(self.kind(), self.to_string())
                .with_action("Try the upload again in a moment"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::Storage(e) => {
                tracing::error!(error = %e, "Object storage error");
            }
            AccountError::DuplicateIdentity => {
                tracing::warn!("Duplicate identity escaped the reconciler");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
