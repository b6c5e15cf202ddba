//! User Routes
//!
//! Registration (multipart, avatar required), login, token refresh, logout,
//! and the current-user read.

use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::extract::CurrentUser;
use super::state::AppState;
use super::upload::{stage_field, StagedFile};
use crate::api::{ApiEnvelope, ApiError, ApiResult};
use crate::users::{User, UserRepository};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/current-user", get(current_user))
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// ==================
// Handlers
// ==================

/// Register a new user from a multipart form
///
/// Text fields: fullName, email, username, password. File fields: avatar
/// (required), coverImage (optional). Staged files clean themselves up on
/// every exit path.
async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<ApiEnvelope> {
    let staging_dir = state.config.media.staging_dir.clone();

    let mut full_name = None;
    let mut email = None;
    let mut username = None;
    let mut password = None;
    let mut avatar: Option<StagedFile> = None;
    let mut cover_image: Option<StagedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "fullName" => full_name = Some(read_text(field).await?),
            "email" => email = Some(read_text(field).await?),
            "username" => username = Some(read_text(field).await?),
            "password" => password = Some(read_text(field).await?),
            "avatar" => avatar = Some(stage_field(field, &staging_dir).await?),
            "coverImage" => cover_image = Some(stage_field(field, &staging_dir).await?),
            _ => {}
        }
    }

    let missing: Vec<String> = [
        ("fullName", &full_name),
        ("email", &email),
        ("username", &username),
        ("password", &password),
    ]
    .iter()
    .filter(|(_, value)| value.as_deref().map(str::trim).unwrap_or("").is_empty())
    .map(|(name, _)| format!("{name} is required"))
    .collect();

    if !missing.is_empty() {
        return Err(ApiError::Validation(missing));
    }

    let full_name = full_name.unwrap_or_default();
    let email = email.unwrap_or_default();
    let username = username.unwrap_or_default();
    let password = password.unwrap_or_default();

    state.auth.password_policy().validate(&password)?;

    if state.users.login_taken(&username, &email)? {
        return Err(ApiError::Conflict(
            "User with this email or username already exists".to_string(),
        ));
    }

    let avatar = avatar.ok_or_else(|| ApiError::BadRequest("Avatar file is required".to_string()))?;

    let avatar_asset = state.media.upload(avatar.path())?;
    let cover_image_url = match &cover_image {
        Some(staged) => Some(state.media.upload(staged.path())?.url),
        None => None,
    };

    let user = User::new(
        username,
        email,
        full_name,
        &password,
        avatar_asset.url,
        cover_image_url,
    )?;
    state.users.insert(&user)?;

    Ok(ApiEnvelope::created("User registered successfully", &user))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))
}

/// Log in with username or email plus password
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<ApiEnvelope> {
    let login = request
        .username
        .as_deref()
        .or(request.email.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Username or email is required".to_string()))?;

    let (user, tokens) = state.auth.login(login, &request.password)?;

    Ok(ApiEnvelope::ok(
        "User logged in successfully",
        json!({ "user": user, "tokens": tokens }),
    ))
}

/// Rotate a refresh token into a fresh token pair
async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<ApiEnvelope> {
    let (_, tokens) = state.auth.refresh(&request.refresh_token)?;

    Ok(ApiEnvelope::ok(
        "Access token refreshed successfully",
        json!({ "tokens": tokens }),
    ))
}

/// Revoke the caller's session
async fn logout(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<LogoutRequest>,
) -> ApiResult<ApiEnvelope> {
    state.auth.logout(&request.refresh_token)?;

    Ok(ApiEnvelope::ok("User logged out successfully", json!({})))
}

/// The acting user's own record
async fn current_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<ApiEnvelope> {
    let user = state.auth.get_user(user.id)?;

    Ok(ApiEnvelope::ok("Current user fetched successfully", &user))
}
