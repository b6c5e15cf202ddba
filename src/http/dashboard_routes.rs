//! Dashboard Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use super::state::AppState;
use crate::api::{parse_id, ApiEnvelope, ApiResult};
use crate::dashboard::channel_stats;
use crate::videos::VideoRepository;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/:channel_id", get(stats))
        .route("/videos/:channel_id", get(channel_videos))
}

async fn stats(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let channel_id = parse_id(&channel_id, "channel ID")?;

    let stats = channel_stats(
        state.videos.as_ref(),
        state.subscriptions.as_ref(),
        state.likes.as_ref(),
        channel_id,
    )?;

    Ok(ApiEnvelope::ok(
        "Channel statistics retrieved successfully",
        &stats,
    ))
}

async fn channel_videos(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let channel_id = parse_id(&channel_id, "channel ID")?;

    let videos = state.videos.list_by_owner(channel_id)?;

    if videos.is_empty() {
        return Ok(ApiEnvelope::with_status(
            StatusCode::NOT_FOUND,
            "No videos found for this channel",
            json!([]),
        ));
    }

    Ok(ApiEnvelope::ok("Videos retrieved successfully", &videos))
}
