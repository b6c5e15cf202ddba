//! # Comments
//!
//! Comments attached to a video, listed newest first with pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{StoreError, StoreResult};

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,

    /// Video the comment is attached to
    pub video_id: Uuid,

    /// Author
    pub owner_id: Uuid,

    pub content: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(video_id: Uuid, owner_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            video_id,
            owner_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Comment repository trait
pub trait CommentRepository: Send + Sync {
    fn insert(&self, comment: &Comment) -> StoreResult<()>;

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Comment>>;

    /// Update an existing comment; fails with `NotFound` if absent
    fn update(&self, comment: &Comment) -> StoreResult<()>;

    /// Delete a comment; returns whether a record existed
    fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Paginated comments of a video, newest first; returns (items, total)
    fn list_by_video(
        &self,
        video_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<Comment>, usize)>;
}

/// In-memory comment repository for tests and development
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: std::sync::RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentRepository for InMemoryCommentRepository {
    fn insert(&self, comment: &Comment) -> StoreResult<()> {
        let mut comments = self.comments.write().map_err(|_| StoreError::poisoned())?;
        comments.push(comment.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let comments = self.comments.read().map_err(|_| StoreError::poisoned())?;
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    fn update(&self, comment: &Comment) -> StoreResult<()> {
        let mut comments = self.comments.write().map_err(|_| StoreError::poisoned())?;
        match comments.iter_mut().find(|c| c.id == comment.id) {
            Some(existing) => {
                *existing = comment.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut comments = self.comments.write().map_err(|_| StoreError::poisoned())?;
        let len_before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() != len_before)
    }

    fn list_by_video(
        &self,
        video_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<Comment>, usize)> {
        let comments = self.comments.read().map_err(|_| StoreError::poisoned())?;

        let mut matches: Vec<Comment> = comments
            .iter()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        let total = matches.len();

        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let items = matches.into_iter().skip(offset).take(limit).collect();
        Ok((items, total))
    }
}
