//! Playlist Routes

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use super::extract::CurrentUser;
use super::state::AppState;
use crate::api::{parse_id, ApiEnvelope, ApiError, ApiResult};
use crate::playlists::{Playlist, PlaylistRepository};

pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_playlist))
        .route(
            "/:playlist_id",
            get(get_playlist).patch(update_playlist).delete(delete_playlist),
        )
        .route("/add/:video_id/:playlist_id", patch(add_video))
        .route("/remove/:video_id/:playlist_id", patch(remove_video))
        .route("/user/:user_id", get(user_playlists))
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

async fn create_playlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreatePlaylistRequest>,
) -> ApiResult<ApiEnvelope> {
    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Playlist name is required".to_string()))?;

    let playlist = Playlist::new(user.id, name.to_string(), request.description);
    state.playlists.insert(&playlist)?;

    Ok(ApiEnvelope::created("Playlist created successfully", &playlist))
}

async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let playlist_id = parse_id(&playlist_id, "playlist ID")?;

    let playlist = state
        .playlists
        .find_by_id(playlist_id)?
        .ok_or(ApiError::NotFound("Playlist"))?;

    Ok(ApiEnvelope::ok("Playlist fetched successfully", &playlist))
}

async fn update_playlist(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(playlist_id): Path<String>,
    Json(request): Json<UpdatePlaylistRequest>,
) -> ApiResult<ApiEnvelope> {
    let playlist_id = parse_id(&playlist_id, "playlist ID")?;

    let mut playlist = state
        .playlists
        .find_by_id(playlist_id)?
        .ok_or(ApiError::NotFound("Playlist"))?;

    if let Some(name) = request.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        playlist.name = name.to_string();
    }
    if let Some(description) = request.description {
        playlist.description = Some(description);
    }
    playlist.updated_at = Utc::now();
    state.playlists.update(&playlist)?;

    Ok(ApiEnvelope::ok("Playlist updated successfully", &playlist))
}

async fn delete_playlist(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(playlist_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let playlist_id = parse_id(&playlist_id, "playlist ID")?;

    if !state.playlists.delete(playlist_id)? {
        return Err(ApiError::NotFound("Playlist"));
    }

    Ok(ApiEnvelope::ok("Playlist deleted successfully", Value::Null))
}

async fn add_video(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((video_id, playlist_id)): Path<(String, String)>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;
    let playlist_id = parse_id(&playlist_id, "playlist ID")?;

    let mut playlist = state
        .playlists
        .find_by_id(playlist_id)?
        .ok_or(ApiError::NotFound("Playlist"))?;

    if playlist.contains(video_id) {
        return Err(ApiError::Conflict(
            "Video is already in the playlist".to_string(),
        ));
    }

    playlist.push_video(video_id);
    state.playlists.update(&playlist)?;

    Ok(ApiEnvelope::ok("Video added to playlist", &playlist))
}

async fn remove_video(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((video_id, playlist_id)): Path<(String, String)>,
) -> ApiResult<ApiEnvelope> {
    let video_id = parse_id(&video_id, "video ID")?;
    let playlist_id = parse_id(&playlist_id, "playlist ID")?;

    let mut playlist = state
        .playlists
        .find_by_id(playlist_id)?
        .ok_or(ApiError::NotFound("Playlist"))?;

    // Removing a video that is not in the playlist is a no-op
    playlist.remove_video(video_id);
    state.playlists.update(&playlist)?;

    Ok(ApiEnvelope::ok("Video removed from playlist", &playlist))
}

async fn user_playlists(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let user_id = parse_id(&user_id, "user ID")?;

    let playlists = state.playlists.list_by_owner(user_id)?;

    Ok(ApiEnvelope::ok("User playlists fetched successfully", &playlists))
}
