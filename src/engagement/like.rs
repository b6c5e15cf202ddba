//! # Likes
//!
//! A like joins a user to exactly one target: a video, a comment, or a
//! tweet. The target kinds share one relation, with at most one like per
//! (user, target) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::toggle::JoinStore;
use crate::store::{StoreError, StoreResult};

/// The entity a like points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    /// The name used in client-facing messages ("Video liked successfully")
    pub fn kind_name(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "Video",
            LikeTarget::Comment(_) => "Comment",
            LikeTarget::Tweet(_) => "Tweet",
        }
    }
}

/// Like join record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,

    /// The actor who liked
    pub user_id: Uuid,

    /// What they liked
    pub target: LikeTarget,

    pub created_at: DateTime<Utc>,
}

impl Like {
    fn new(user_id: Uuid, target: LikeTarget) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            target,
            created_at: Utc::now(),
        }
    }
}

/// Like repository: the toggle interface plus the read queries
pub trait LikeRepository: JoinStore<Key = (Uuid, LikeTarget), Record = Like> {
    /// Ids of all videos a user has liked, newest like first
    fn videos_liked_by(&self, user_id: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Total likes across a set of video ids
    fn count_for_videos(&self, video_ids: &[Uuid]) -> StoreResult<usize>;
}

/// In-memory like repository for tests and development
///
/// Enforces the (user, target) uniqueness constraint the toggle protocol
/// relies on.
#[derive(Debug, Default)]
pub struct InMemoryLikeRepository {
    likes: std::sync::RwLock<Vec<Like>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JoinStore for InMemoryLikeRepository {
    type Key = (Uuid, LikeTarget);
    type Record = Like;

    fn find(&self, (user_id, target): Self::Key) -> StoreResult<Option<Like>> {
        let likes = self.likes.read().map_err(|_| StoreError::poisoned())?;
        Ok(likes
            .iter()
            .find(|l| l.user_id == user_id && l.target == target)
            .cloned())
    }

    fn insert(&self, (user_id, target): Self::Key) -> StoreResult<Like> {
        let mut likes = self.likes.write().map_err(|_| StoreError::poisoned())?;

        if likes.iter().any(|l| l.user_id == user_id && l.target == target) {
            return Err(StoreError::Duplicate("Already liked".to_string()));
        }

        let like = Like::new(user_id, target);
        likes.push(like.clone());
        Ok(like)
    }

    fn remove(&self, (user_id, target): Self::Key) -> StoreResult<bool> {
        let mut likes = self.likes.write().map_err(|_| StoreError::poisoned())?;
        let len_before = likes.len();
        likes.retain(|l| !(l.user_id == user_id && l.target == target));
        Ok(likes.len() != len_before)
    }
}

impl LikeRepository for InMemoryLikeRepository {
    fn videos_liked_by(&self, user_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let likes = self.likes.read().map_err(|_| StoreError::poisoned())?;

        let mut liked: Vec<&Like> = likes
            .iter()
            .filter(|l| l.user_id == user_id && matches!(l.target, LikeTarget::Video(_)))
            .collect();
        liked.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(liked
            .into_iter()
            .filter_map(|l| match l.target {
                LikeTarget::Video(id) => Some(id),
                _ => None,
            })
            .collect())
    }

    fn count_for_videos(&self, video_ids: &[Uuid]) -> StoreResult<usize> {
        let likes = self.likes.read().map_err(|_| StoreError::poisoned())?;
        Ok(likes
            .iter()
            .filter(|l| match l.target {
                LikeTarget::Video(id) => video_ids.contains(&id),
                _ => false,
            })
            .count())
    }
}
