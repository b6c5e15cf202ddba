//! # Tweets
//!
//! Short text posts attached to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{StoreError, StoreResult};

/// Tweet model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: Uuid,

    /// Author
    pub owner_id: Uuid,

    pub content: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Tweet {
    pub fn new(owner_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Tweet repository trait
pub trait TweetRepository: Send + Sync {
    fn insert(&self, tweet: &Tweet) -> StoreResult<()>;

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tweet>>;

    /// Update an existing tweet; fails with `NotFound` if absent
    fn update(&self, tweet: &Tweet) -> StoreResult<()>;

    /// Delete a tweet; returns whether a record existed
    fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// All tweets of a user, newest first
    fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Tweet>>;
}

/// In-memory tweet repository for tests and development
#[derive(Debug, Default)]
pub struct InMemoryTweetRepository {
    tweets: std::sync::RwLock<Vec<Tweet>>,
}

impl InMemoryTweetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TweetRepository for InMemoryTweetRepository {
    fn insert(&self, tweet: &Tweet) -> StoreResult<()> {
        let mut tweets = self.tweets.write().map_err(|_| StoreError::poisoned())?;
        tweets.push(tweet.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tweet>> {
        let tweets = self.tweets.read().map_err(|_| StoreError::poisoned())?;
        Ok(tweets.iter().find(|t| t.id == id).cloned())
    }

    fn update(&self, tweet: &Tweet) -> StoreResult<()> {
        let mut tweets = self.tweets.write().map_err(|_| StoreError::poisoned())?;
        match tweets.iter_mut().find(|t| t.id == tweet.id) {
            Some(existing) => {
                *existing = tweet.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tweets = self.tweets.write().map_err(|_| StoreError::poisoned())?;
        let len_before = tweets.len();
        tweets.retain(|t| t.id != id);
        Ok(tweets.len() != len_before)
    }

    fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Tweet>> {
        let tweets = self.tweets.read().map_err(|_| StoreError::poisoned())?;
        let mut owned: Vec<Tweet> = tweets.iter().filter(|t| t.owner_id == owner).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_round_trip() {
        let repo = InMemoryTweetRepository::new();
        let owner = Uuid::new_v4();

        let mut tweet = Tweet::new(owner, "hello".to_string());
        repo.insert(&tweet).unwrap();

        tweet.content = "edited".to_string();
        repo.update(&tweet).unwrap();
        assert_eq!(repo.find_by_id(tweet.id).unwrap().unwrap().content, "edited");

        assert!(repo.delete(tweet.id).unwrap());
        assert!(!repo.delete(tweet.id).unwrap());
    }

    #[test]
    fn test_list_by_owner_only_theirs() {
        let repo = InMemoryTweetRepository::new();
        let ann = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.insert(&Tweet::new(ann, "one".to_string())).unwrap();
        repo.insert(&Tweet::new(bob, "two".to_string())).unwrap();
        repo.insert(&Tweet::new(ann, "three".to_string())).unwrap();

        let tweets = repo.list_by_owner(ann).unwrap();
        assert_eq!(tweets.len(), 2);
        assert!(tweets.iter().all(|t| t.owner_id == ann));
    }

    #[test]
    fn test_update_missing_tweet() {
        let repo = InMemoryTweetRepository::new();
        let tweet = Tweet::new(Uuid::new_v4(), "ghost".to_string());
        assert!(matches!(repo.update(&tweet), Err(StoreError::NotFound)));
    }
}
