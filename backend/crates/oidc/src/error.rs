//! OIDC Error Types
//!
//! Provider-facing error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// OIDC-specific result type alias
pub type OidcResult<T> = Result<T, OidcError>;

/// OIDC-specific error variants
#[derive(Debug, Error)]
pub enum OidcError {
    /// Provider unreachable or timed out; the caller may retry
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Discovery document is missing a required field or unparseable
    #[error("Identity provider configuration error: {0}")]
    ProviderConfigError(String),

    /// Callback arrived without an authorization code
    #[error("Authorization code not received from identity provider")]
    MissingAuthorizationCode,

    /// Token or userinfo response lacked a required field
    #[error("Malformed identity provider response: {0}")]
    MalformedResponse(String),

    /// Provider reports the email address as unverified
    #[error("Email address not verified by identity provider")]
    EmailNotVerified,
}

impl OidcError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            OidcError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            OidcError::ProviderConfigError(_) | OidcError::MalformedResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            OidcError::MissingAuthorizationCode | OidcError::EmailNotVerified => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OidcError::ProviderUnavailable(_) => ErrorKind::ServiceUnavailable,
            OidcError::ProviderConfigError(_) | OidcError::MalformedResponse(_) => {
                ErrorKind::InternalServerError
            }
            OidcError::MissingAuthorizationCode | OidcError::EmailNotVerified => {
                ErrorKind::BadRequest
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            OidcError::ProviderUnavailable(_) => err.with_action("Please try again later"),
            OidcError::EmailNotVerified => {
                err.with_action("Verify your email with the identity provider and retry")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            OidcError::ProviderUnavailable(detail) => {
                tracing::error!(detail = %detail, "Identity provider unavailable");
            }
            OidcError::ProviderConfigError(detail) => {
                tracing::error!(detail = %detail, "Identity provider configuration error");
            }
            OidcError::MalformedResponse(detail) => {
                tracing::error!(detail = %detail, "Malformed identity provider response");
            }
            OidcError::EmailNotVerified => {
                tracing::warn!("Login rejected: email not verified");
            }
            OidcError::MissingAuthorizationCode => {
                tracing::warn!("Callback without authorization code");
            }
        }
    }
}

impl IntoResponse for OidcError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<reqwest::Error> for OidcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            OidcError::MalformedResponse(err.to_string())
        } else {
            // Timeouts, connection failures, TLS errors
            OidcError::ProviderUnavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            OidcError::ProviderUnavailable("timeout".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            OidcError::ProviderConfigError("missing field".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            OidcError::MissingAuthorizationCode.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            OidcError::EmailNotVerified.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
