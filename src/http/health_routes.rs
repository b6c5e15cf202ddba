//! Healthcheck Route

use axum::routing::get;
use axum::Router;
use serde_json::Value;

use super::state::AppState;
use crate::api::ApiEnvelope;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}

async fn healthcheck() -> ApiEnvelope {
    ApiEnvelope::ok("OK", Value::Null)
}
