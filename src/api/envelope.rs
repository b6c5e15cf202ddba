//! # Response Envelope
//!
//! Uniform wire-format wrapper for all API results.
//!
//! Every successful controller path terminates by emitting exactly one
//! envelope; the HTTP status always matches the embedded `statusCode` so
//! clients parsing only the body can determine the outcome.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Uniform success/failure response wrapper
///
/// Serializes as `{statusCode, message, data, success}` with
/// `success = statusCode < 400`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    pub status_code: u16,
    pub message: String,
    pub data: Value,
    pub success: bool,
}

impl ApiEnvelope {
    /// Build an envelope with an arbitrary status code
    pub fn with_status<T: Serialize>(status: StatusCode, message: &str, data: T) -> Self {
        let data = serde_json::to_value(data).unwrap_or(Value::Null);
        Self {
            status_code: status.as_u16(),
            message: message.to_string(),
            data,
            success: status.as_u16() < 400,
        }
    }

    /// 200 OK envelope
    pub fn ok<T: Serialize>(message: &str, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// 201 Created envelope
    pub fn created<T: Serialize>(message: &str, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    /// The HTTP status carried by this envelope
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK)
    }
}

impl IntoResponse for ApiEnvelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_wire_shape() {
        let envelope = ApiEnvelope::ok("Video fetched successfully", json!({"id": 1}));

        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["statusCode"], 200);
        assert_eq!(wire["message"], "Video fetched successfully");
        assert_eq!(wire["data"]["id"], 1);
        assert_eq!(wire["success"], true);
    }

    #[test]
    fn test_created_envelope() {
        let envelope = ApiEnvelope::created("Tweet created successfully", json!({}));
        assert_eq!(envelope.status(), StatusCode::CREATED);
        assert!(envelope.success);
    }

    #[test]
    fn test_success_derived_from_status() {
        let envelope = ApiEnvelope::with_status(StatusCode::NOT_FOUND, "No videos found", json!([]));
        assert!(!envelope.success);
        assert_eq!(envelope.status_code, 404);
    }

    #[test]
    fn test_null_data_serializes_as_null() {
        let envelope = ApiEnvelope::ok("OK", Value::Null);
        let wire = serde_json::to_value(&envelope).unwrap();
        assert!(wire["data"].is_null());
    }
}
