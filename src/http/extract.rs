//! # Auth Extractor
//!
//! Resolves the acting user from a bearer access token. Routes that take a
//! `CurrentUser` parameter reject unauthenticated requests with a 401
//! envelope before the handler body runs.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use super::state::AppState;
use crate::api::ApiError;
use crate::auth::AuthError;

/// The authenticated actor behind the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::AuthenticationRequired)?;

        let actor = state.auth.validate_access_token(token)?;

        Ok(CurrentUser {
            id: actor.user_id,
            username: actor.username,
        })
    }
}
