//! Subscription Routes
//!
//! Toggle-style subscribe/unsubscribe plus the two directional listings,
//! enriched with the joined user's public fields.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::extract::CurrentUser;
use super::state::AppState;
use crate::api::{parse_id, ApiEnvelope, ApiResult};
use crate::engagement::{toggle, SubscriptionRepository, ToggleOutcome};
use crate::users::UserRepository;

pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/c/:channel_id", get(channel_subscribers).post(toggle_subscription))
        .route("/u/:subscriber_id", get(subscribed_channels))
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberEntry {
    pub subscription_id: Uuid,
    pub subscriber_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEntry {
    pub subscription_id: Uuid,
    pub channel_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

// ==================
// Handlers
// ==================

async fn toggle_subscription(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(channel_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let channel_id = parse_id(&channel_id, "channel ID")?;

    match toggle(state.subscriptions.as_ref(), (user.id, channel_id))? {
        ToggleOutcome::Added(subscription) => {
            Ok(ApiEnvelope::created("Subscribed successfully", &subscription))
        }
        ToggleOutcome::Removed => Ok(ApiEnvelope::ok("Unsubscribed successfully", json!({}))),
    }
}

async fn channel_subscribers(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let channel_id = parse_id(&channel_id, "channel ID")?;

    let subscriptions = state.subscriptions.subscribers_of(channel_id)?;

    let mut entries = Vec::with_capacity(subscriptions.len());
    for subscription in subscriptions {
        let user = state.users.find_by_id(subscription.subscriber_id)?;
        entries.push(SubscriberEntry {
            subscription_id: subscription.id,
            subscriber_id: subscription.subscriber_id,
            username: user.as_ref().map(|u| u.username.clone()),
            email: user.as_ref().map(|u| u.email.clone()),
            subscribed_at: subscription.created_at,
        });
    }

    Ok(ApiEnvelope::ok("Fetched subscribers successfully", &entries))
}

async fn subscribed_channels(
    State(state): State<AppState>,
    Path(subscriber_id): Path<String>,
) -> ApiResult<ApiEnvelope> {
    let subscriber_id = parse_id(&subscriber_id, "subscriber ID")?;

    let subscriptions = state.subscriptions.channels_of(subscriber_id)?;

    let mut entries = Vec::with_capacity(subscriptions.len());
    for subscription in subscriptions {
        let user = state.users.find_by_id(subscription.channel_id)?;
        entries.push(ChannelEntry {
            subscription_id: subscription.id,
            channel_id: subscription.channel_id,
            username: user.as_ref().map(|u| u.username.clone()),
            full_name: user.as_ref().map(|u| u.full_name.clone()),
            subscribed_at: subscription.created_at,
        });
    }

    Ok(ApiEnvelope::ok(
        "Fetched subscribed channels successfully",
        &entries,
    ))
}
