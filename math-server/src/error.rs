//! Error types for the HTTP API

use crate::api::{ErrorResponse, ValidationErrorResponse, ValidationIssue};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use math_core::{AuthError, MathError};
use std::fmt;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// No bearer credential on the request (403)
    NotAuthenticated,

    /// Credential sent under a non-Bearer scheme (403)
    InvalidScheme,

    /// Bearer credential does not match the secret (403)
    InvalidToken,

    /// Payload failed validation (422)
    Validation(Vec<ValidationIssue>),

    /// Domain precondition violated (400)
    BadRequest(String),

    /// Body could not be read; carries the rejection's own status (e.g. 413)
    PayloadRejected(StatusCode, String),

    /// Route not found (404)
    NotFound(String),

    /// Persisting the operation failed (500)
    Storage(String),

    /// Service unavailable (503)
    ServiceUnavailable(String),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotAuthenticated | ApiError::InvalidScheme | ApiError::InvalidToken => {
                StatusCode::FORBIDDEN
            }
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadRejected(status, _) => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Short label used for metrics
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotAuthenticated => "not_authenticated",
            ApiError::InvalidScheme => "invalid_scheme",
            ApiError::InvalidToken => "invalid_token",
            ApiError::Validation(_) => "validation",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadRejected(..) => "payload_rejected",
            ApiError::NotFound(_) => "not_found",
            ApiError::Storage(_) => "storage",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotAuthenticated => write!(f, "{}", AuthError::NotAuthenticated),
            ApiError::InvalidScheme => write!(f, "{}", AuthError::InvalidScheme),
            ApiError::InvalidToken => write!(f, "{}", AuthError::InvalidToken),
            ApiError::Validation(issues) => {
                write!(f, "Validation failed: {} issue(s)", issues.len())
            }
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::PayloadRejected(status, msg) => {
                write!(f, "Payload rejected ({}): {}", status.as_u16(), msg)
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Storage(msg) => write!(f, "Storage failure: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => ApiError::NotAuthenticated,
            AuthError::InvalidScheme => ApiError::InvalidScheme,
            AuthError::InvalidToken => ApiError::InvalidToken,
        }
    }
}

impl From<MathError> for ApiError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::DivisionByZero => ApiError::BadRequest(err.to_string()),
            MathError::UnknownOperation(_) => ApiError::NotFound("Not Found".to_string()),
            MathError::InvalidConfig(_) | MathError::Io(_) | MathError::Storage(_) => {
                ApiError::Storage(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        crate::metrics::record_error(self.error_type());

        let detail = match self {
            ApiError::Validation(issues) => {
                let body = ValidationErrorResponse { detail: issues };
                return (status, Json(body)).into_response();
            }
            ApiError::NotAuthenticated => AuthError::NotAuthenticated.to_string(),
            ApiError::InvalidScheme => AuthError::InvalidScheme.to_string(),
            ApiError::InvalidToken => AuthError::InvalidToken.to_string(),
            ApiError::BadRequest(msg)
            | ApiError::PayloadRejected(_, msg)
            | ApiError::NotFound(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
            // Store internals stay in the logs
            ApiError::Storage(_) => "Internal Server Error".to_string(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
