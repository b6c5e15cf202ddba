//! Comment Routes
//!
//! Comments hang off a video; the listing is paginated, newest first.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;

use super::extract::CurrentUser;
use super::state::AppState;
use crate::api::{parse_id, ApiEnvelope, ApiError, ApiResult, Page, PageQuery};
use crate::comments::{Comment, CommentRepository};

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/:video_id", get(video_comments).post(add_comment))
        .route("/c/:comment_id", patch(update_comment).delete(delete_comment))
}

#[derive(Debug, Deserialize)]
pub struct CommentContentRequest {
    pub content: String,
}

async fn video_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(page_query): Query<PageQuery>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;

    let (_, limit) = page_query.normalized();
    let (items, total) = state
        .comments
        .list_by_video(video_id, page_query.offset(), limit)?;

    Ok(ApiEnvelope::ok(
        "Comments retrieved successfully",
        Page::new(items, total, &page_query),
    ))
}

async fn add_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(video_id): Path<String>,
    Json(request): Json<CommentContentRequest>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;

    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Content is required".to_string()));
    }

    let comment = Comment::new(video_id, user.id, request.content);
    state.comments.insert(&comment)?;

    Ok(ApiEnvelope::created("Comment added successfully", &comment))
}

async fn update_comment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(comment_id): Path<String>,
    Json(request): Json<CommentContentRequest>,
) -> ApiResult<ApiEnvelope> {
    let comment_id = parse_id(&comment_id, "comment ID")?;

    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Content is required".to_string()));
    }

    let mut comment = state
        .comments
        .find_by_id(comment_id)?
        .ok_or(ApiError::NotFound("Comment"))?;

    comment.content = request.content;
    comment.updated_at = Utc::now();
    state.comments.update(&comment)?;

    Ok(ApiEnvelope::ok("Comment updated successfully", &comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(comment_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let comment_id = parse_id(&comment_id, "comment ID")?;

    let comment = state
        .comments
        .find_by_id(comment_id)?
        .ok_or(ApiError::NotFound("Comment"))?;
    state.comments.delete(comment_id)?;

    Ok(ApiEnvelope::ok("Comment deleted successfully", &comment))
}
