//! # Subscriptions
//!
//! A subscription joins a subscriber to a channel (both users), with at
//! most one subscription per (subscriber, channel) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::toggle::JoinStore;
use crate::store::{StoreError, StoreResult};

/// Subscription join record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,

    /// The user who subscribed
    pub subscriber_id: Uuid,

    /// The channel (user) subscribed to
    pub channel_id: Uuid,

    pub created_at: DateTime<Utc>,
}

impl Subscription {
    fn new(subscriber_id: Uuid, channel_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            subscriber_id,
            channel_id,
            created_at: Utc::now(),
        }
    }
}

/// Subscription repository: the toggle interface plus the read queries
pub trait SubscriptionRepository: JoinStore<Key = (Uuid, Uuid), Record = Subscription> {
    /// All subscriptions to a channel
    fn subscribers_of(&self, channel_id: Uuid) -> StoreResult<Vec<Subscription>>;

    /// All subscriptions held by a subscriber
    fn channels_of(&self, subscriber_id: Uuid) -> StoreResult<Vec<Subscription>>;

    /// Number of subscribers of a channel
    fn count_subscribers(&self, channel_id: Uuid) -> StoreResult<usize>;
}

/// In-memory subscription repository for tests and development
///
/// Enforces the (subscriber, channel) uniqueness constraint the toggle
/// protocol relies on.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: std::sync::RwLock<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JoinStore for InMemorySubscriptionRepository {
    type Key = (Uuid, Uuid);
    type Record = Subscription;

    fn find(&self, (subscriber_id, channel_id): Self::Key) -> StoreResult<Option<Subscription>> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|_| StoreError::poisoned())?;
        Ok(subscriptions
            .iter()
            .find(|s| s.subscriber_id == subscriber_id && s.channel_id == channel_id)
            .cloned())
    }

    fn insert(&self, (subscriber_id, channel_id): Self::Key) -> StoreResult<Subscription> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|_| StoreError::poisoned())?;

        if subscriptions
            .iter()
            .any(|s| s.subscriber_id == subscriber_id && s.channel_id == channel_id)
        {
            return Err(StoreError::Duplicate("Already subscribed".to_string()));
        }

        let subscription = Subscription::new(subscriber_id, channel_id);
        subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    fn remove(&self, (subscriber_id, channel_id): Self::Key) -> StoreResult<bool> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|_| StoreError::poisoned())?;
        let len_before = subscriptions.len();
        subscriptions.retain(|s| !(s.subscriber_id == subscriber_id && s.channel_id == channel_id));
        Ok(subscriptions.len() != len_before)
    }
}

impl SubscriptionRepository for InMemorySubscriptionRepository {
    fn subscribers_of(&self, channel_id: Uuid) -> StoreResult<Vec<Subscription>> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|_| StoreError::poisoned())?;
        Ok(subscriptions
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .cloned()
            .collect())
    }

    fn channels_of(&self, subscriber_id: Uuid) -> StoreResult<Vec<Subscription>> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|_| StoreError::poisoned())?;
        Ok(subscriptions
            .iter()
            .filter(|s| s.subscriber_id == subscriber_id)
            .cloned()
            .collect())
    }

    fn count_subscribers(&self, channel_id: Uuid) -> StoreResult<usize> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|_| StoreError::poisoned())?;
        Ok(subscriptions
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .count())
    }
}
