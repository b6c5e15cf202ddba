//! Like Routes
//!
//! Toggle-style like endpoints for videos, comments, and tweets, plus the
//! actor's liked-video listing. One endpoint per target kind, all driven
//! by the same toggle protocol.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;

use super::extract::CurrentUser;
use super::state::AppState;
use crate::api::{parse_id, ApiEnvelope, ApiResult};
use crate::engagement::{toggle, LikeRepository, LikeTarget, ToggleOutcome};
use crate::videos::VideoRepository;

pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle/v/:video_id", post(toggle_video_like))
        .route("/toggle/c/:comment_id", post(toggle_comment_like))
        .route("/toggle/t/:tweet_id", post(toggle_tweet_like))
        .route("/videos", get(liked_videos))
}

async fn toggle_video_like(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(video_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;
    toggle_like(&state, &user, LikeTarget::Video(video_id))
}

async fn toggle_comment_like(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(comment_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let comment_id = parse_id(&comment_id, "comment ID")?;
    toggle_like(&state, &user, LikeTarget::Comment(comment_id))
}

async fn toggle_tweet_like(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(tweet_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let tweet_id = parse_id(&tweet_id, "tweet ID")?;
    toggle_like(&state, &user, LikeTarget::Tweet(tweet_id))
}

fn toggle_like(state: &AppState, user: &CurrentUser, target: LikeTarget) -> ApiResult<ApiEnvelope> {
    let kind = target.kind_name();

    match toggle(state.likes.as_ref(), (user.id, target))? {
        ToggleOutcome::Added(like) => Ok(ApiEnvelope::created(
            &format!("{kind} liked successfully"),
            &like,
        )),
        ToggleOutcome::Removed => Ok(ApiEnvelope::ok(
            &format!("{kind} unliked successfully"),
            json!({}),
        )),
    }
}

async fn liked_videos(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<ApiEnvelope> {
    let video_ids = state.likes.videos_liked_by(user.id)?;

    let mut videos = Vec::with_capacity(video_ids.len());
    for video_id in video_ids {
        // Likes can outlive their video; skip dangling references
        if let Some(video) = state.videos.find_by_id(video_id)? {
            videos.push(video);
        }
    }

    Ok(ApiEnvelope::ok("Liked videos fetched successfully", &videos))
}
