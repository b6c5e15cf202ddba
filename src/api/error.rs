//! # API Errors
//!
//! The typed error signal raised by controllers and rendered into the
//! response envelope at the HTTP boundary.
//!
//! Any layer may construct an `ApiError`; exactly one layer (the
//! `IntoResponse` impl below, plus the panic/timeout layers in
//! `http::layers`) decides how it becomes a response. Collaborator
//! internals are carried for logging but never serialized to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::errors::AuthError;
use crate::media::MediaError;
use crate::observability::Logger;
use crate::store::StoreError;

/// Result type for controller operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API faults, each mapped to exactly one HTTP status class
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed identifier in a path or body
    #[error("Invalid {0}")]
    InvalidId(&'static str),

    /// Missing or malformed request field
    #[error("{0}")]
    BadRequest(String),

    /// Multiple validation failures, carried as sub-errors
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Resource absent
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate resource on create
    #[error("{0}")]
    Conflict(String),

    /// Authentication/authorization fault
    #[error("{0}")]
    Auth(#[from] AuthError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Downstream collaborator failure; the detail is logged, not serialized
    #[error("Internal server error")]
    Upstream(String),

    /// The request exceeded its deadline
    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,

            ApiError::Auth(auth_err) => {
                StatusCode::from_u16(auth_err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED)
            }

            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Structured sub-errors, if any
    pub fn sub_errors(&self) -> Vec<String> {
        match self {
            ApiError::Validation(errors) => errors.clone(),
            _ => Vec::new(),
        }
    }

    /// Whether the fault is attributable to the caller
    pub fn is_client_error(&self) -> bool {
        self.status_code().as_u16() < 500
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Resource"),
            StoreError::Duplicate(message) => ApiError::Conflict(message),
            StoreError::Unavailable(detail) => ApiError::Upstream(detail),
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::NotFound(_) => ApiError::NotFound("Media asset"),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

/// Failure envelope body: `{statusCode, message, errors, success: false}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub errors: Vec<String>,
    pub success: bool,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            status_code: err.status_code().as_u16(),
            message: err.to_string(),
            errors: err.sub_errors(),
            success: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let status_str = status.as_u16().to_string();

        if self.is_client_error() {
            Logger::warn(
                "request_failed",
                &[("status", &status_str), ("message", &self.to_string())],
            );
        } else {
            // 5xx detail stays in the logs; clients get the generic message
            let detail = match &self {
                ApiError::Upstream(detail) => detail.clone(),
                other => other.to_string(),
            };
            Logger::error("request_failed", &[("status", &status_str), ("detail", &detail)]);
        }

        let body = ErrorBody::from(&self);
        (status, Json(body)).into_response()
    }
}
