//! Video Routes
//!
//! Listing with filter/sort/pagination, multipart publish, metadata and
//! file updates, deletion (media asset included), and the publish toggle.

use axum::extract::{Multipart, Path, Query, State};
use axum::routing::{get, patch};
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use super::extract::CurrentUser;
use super::state::AppState;
use super::upload::{stage_field, StagedFile};
use crate::api::query::DEFAULT_PAGE_LIMIT;
use crate::api::{parse_id, ApiEnvelope, ApiError, ApiResult, Page, PageQuery, SortOrder};
use crate::media::MediaError;
use crate::videos::{Video, VideoFilter, VideoRepository, VideoSort};

pub fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_videos).post(publish_video))
        .route(
            "/:video_id",
            get(get_video).patch(update_video).delete(delete_video),
        )
        .route("/toggle/publish/:video_id", patch(toggle_publish))
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Case-insensitive title search
    #[serde(default)]
    pub query: Option<String>,
    /// Restrict to one channel
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_type: Option<SortOrder>,
}

// ==================
// Handlers
// ==================

async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoListQuery>,
) -> ApiResult<ApiEnvelope> {
    let page_query = PageQuery {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    };

    let owner = match &query.user_id {
        Some(raw) => Some(parse_id(raw, "user ID")?),
        None => None,
    };

    let filter = VideoFilter {
        owner,
        title_query: query.query.clone(),
    };
    let sort = query.sort_by.as_deref().map(VideoSort::parse).unwrap_or_default();
    let order = query.sort_type.unwrap_or_default();

    let (_, limit) = page_query.normalized();
    let (items, total) =
        state
            .videos
            .list(&filter, sort, order, page_query.offset(), limit)?;

    Ok(ApiEnvelope::ok(
        "Videos fetched successfully",
        Page::new(items, total, &page_query),
    ))
}

/// Publish a new video from a multipart form
///
/// Text fields: title, description. File field: videoFile.
async fn publish_video(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<ApiEnvelope> {
    let staging_dir = state.config.media.staging_dir.clone();

    let mut title = None;
    let mut description = None;
    let mut video_file: Option<StagedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "videoFile" => video_file = Some(stage_field(field, &staging_dir).await?),
            _ => {}
        }
    }

    let (title, description, video_file) = match (title, description, video_file) {
        (Some(t), Some(d), Some(f)) if !t.trim().is_empty() => (t, d, f),
        _ => {
            return Err(ApiError::BadRequest(
                "Title, description, and video file are required".to_string(),
            ))
        }
    };

    let asset = state.media.upload(video_file.path())?;

    let video = Video::new(user.id, title, description, asset.url, asset.asset_id);
    state.videos.insert(&video)?;

    Ok(ApiEnvelope::created(
        "Video uploaded and published successfully",
        &video,
    ))
}

async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;

    let video = state
        .videos
        .find_by_id(video_id)?
        .ok_or(ApiError::NotFound("Video"))?;

    Ok(ApiEnvelope::ok("Video fetched successfully", &video))
}

/// Update video metadata, optionally replacing the file
async fn update_video(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;
    let staging_dir = state.config.media.staging_dir.clone();

    let mut video = state
        .videos
        .find_by_id(video_id)?
        .ok_or(ApiError::NotFound("Video"))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                let title = read_text(field).await?;
                if !title.trim().is_empty() {
                    video.title = title;
                }
            }
            "description" => video.description = read_text(field).await?,
            "videoFile" => {
                let staged = stage_field(field, &staging_dir).await?;
                let asset = state.media.upload(staged.path())?;

                // Old asset is replaced; best-effort removal
                remove_asset_if_present(&state, &video.asset_id);

                video.url = asset.url;
                video.asset_id = asset.asset_id;
            }
            _ => {}
        }
    }

    video.updated_at = Utc::now();
    state.videos.update(&video)?;

    Ok(ApiEnvelope::ok("Video updated successfully", &video))
}

async fn delete_video(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(video_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;

    let video = state
        .videos
        .find_by_id(video_id)?
        .ok_or(ApiError::NotFound("Video"))?;

    // Remove the media asset first, then the record
    match state.media.delete(&video.asset_id) {
        Ok(()) | Err(MediaError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }
    state.videos.delete(video_id)?;

    Ok(ApiEnvelope::ok("Video deleted successfully", Value::Null))
}

async fn toggle_publish(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(video_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;

    let mut video = state
        .videos
        .find_by_id(video_id)?
        .ok_or(ApiError::NotFound("Video"))?;

    video.is_published = !video.is_published;
    video.updated_at = Utc::now();
    state.videos.update(&video)?;

    let message = if video.is_published {
        "Video published successfully"
    } else {
        "Video unpublished successfully"
    };
    Ok(ApiEnvelope::ok(message, &video))
}

fn remove_asset_if_present(state: &AppState, asset_id: &str) {
    if let Err(MediaError::Io(detail)) = state.media.delete(asset_id) {
        crate::observability::Logger::warn("media_delete_failed", &[("detail", detail.as_str())]);
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))
}
