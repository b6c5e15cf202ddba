//! # Boundary Layers
//!
//! The middleware half of the boundary adapter: whatever a handler or a
//! downstream collaborator does, the client receives a structured envelope.
//! Panics become a 500 envelope, deadline overruns become a 504 envelope,
//! and every request is logged once with its status and latency.

use std::any::Any;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::state::AppState;
use crate::api::error::ErrorBody;
use crate::api::ApiError;
use crate::observability::Logger;

/// One log line per request: method, path, status, latency
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let latency_ms = start.elapsed().as_millis().to_string();
    Logger::info(
        "http_request",
        &[
            ("latency_ms", latency_ms.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status.as_str()),
        ],
    );

    response
}

/// Abort request handling at the configured deadline and answer 504
pub async fn request_timeout(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let deadline = Duration::from_secs(state.config.http.request_timeout_secs);

    match tokio::time::timeout(deadline, next.run(req)).await {
        Ok(response) => response,
        // The handler future is dropped here, cancelling downstream calls
        Err(_) => ApiError::Timeout.into_response(),
    }
}

/// Render a handler panic as a 500 envelope instead of dropping the connection
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    Logger::error("handler_panicked", &[("detail", &detail)]);

    let body = ErrorBody {
        status_code: 500,
        message: "Internal server error".to_string(),
        errors: Vec::new(),
        success: false,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_response_is_enveloped_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
