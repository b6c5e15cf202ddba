//! Tweet Routes

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use super::extract::CurrentUser;
use super::state::AppState;
use crate::api::{parse_id, ApiEnvelope, ApiError, ApiResult};
use crate::tweets::{Tweet, TweetRepository};

pub fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_tweet))
        .route("/user/:user_id", get(user_tweets))
        .route("/:tweet_id", patch(update_tweet).delete(delete_tweet))
}

#[derive(Debug, Deserialize)]
pub struct TweetContentRequest {
    pub content: String,
}

async fn create_tweet(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<TweetContentRequest>,
) -> ApiResult<ApiEnvelope> {
    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Tweet content cannot be empty".to_string(),
        ));
    }

    let tweet = Tweet::new(user.id, request.content);
    state.tweets.insert(&tweet)?;

    Ok(ApiEnvelope::created("Tweet created successfully", &tweet))
}

async fn user_tweets(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(user_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let user_id = parse_id(&user_id, "user ID")?;

    let tweets = state.tweets.list_by_owner(user_id)?;

    Ok(ApiEnvelope::ok("Fetched user tweets successfully", &tweets))
}

async fn update_tweet(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(tweet_id): Path<String>,
    Json(request): Json<TweetContentRequest>,
) -> ApiResult<ApiEnvelope> {
    let tweet_id = parse_id(&tweet_id, "tweet ID")?;

    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Tweet content cannot be empty".to_string(),
        ));
    }

    let mut tweet = state
        .tweets
        .find_by_id(tweet_id)?
        .ok_or(ApiError::NotFound("Tweet"))?;

    tweet.content = request.content;
    tweet.updated_at = Utc::now();
    state.tweets.update(&tweet)?;

    Ok(ApiEnvelope::ok("Tweet updated successfully", &tweet))
}

async fn delete_tweet(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(tweet_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let tweet_id = parse_id(&tweet_id, "tweet ID")?;

    if !state.tweets.delete(tweet_id)? {
        return Err(ApiError::NotFound("Tweet"));
    }

    Ok(ApiEnvelope::ok("Tweet deleted successfully", Value::Null))
}
