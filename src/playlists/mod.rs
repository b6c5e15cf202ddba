//! # Playlists
//!
//! Named, ordered collections of videos owned by a user. A video appears at
//! most once per playlist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{StoreError, StoreResult};

/// Playlist model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,

    /// Owning user
    pub owner_id: Uuid,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Videos in playlist order
    pub video_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn new(owner_id: Uuid, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            description,
            video_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the playlist already contains a video
    pub fn contains(&self, video_id: Uuid) -> bool {
        self.video_ids.contains(&video_id)
    }

    /// Append a video; the caller is responsible for the duplicate check
    pub fn push_video(&mut self, video_id: Uuid) {
        self.video_ids.push(video_id);
        self.updated_at = Utc::now();
    }

    /// Remove a video if present; removing an absent video is a no-op
    pub fn remove_video(&mut self, video_id: Uuid) {
        self.video_ids.retain(|id| *id != video_id);
        self.updated_at = Utc::now();
    }
}

/// Playlist repository trait
pub trait PlaylistRepository: Send + Sync {
    fn insert(&self, playlist: &Playlist) -> StoreResult<()>;

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Playlist>>;

    /// Update an existing playlist; fails with `NotFound` if absent
    fn update(&self, playlist: &Playlist) -> StoreResult<()>;

    /// Delete a playlist; returns whether a record existed
    fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// All playlists of a user, newest first
    fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Playlist>>;
}

/// In-memory playlist repository for tests and development
#[derive(Debug, Default)]
pub struct InMemoryPlaylistRepository {
    playlists: std::sync::RwLock<Vec<Playlist>>,
}

impl InMemoryPlaylistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaylistRepository for InMemoryPlaylistRepository {
    fn insert(&self, playlist: &Playlist) -> StoreResult<()> {
        let mut playlists = self.playlists.write().map_err(|_| StoreError::poisoned())?;
        playlists.push(playlist.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Playlist>> {
        let playlists = self.playlists.read().map_err(|_| StoreError::poisoned())?;
        Ok(playlists.iter().find(|p| p.id == id).cloned())
    }

    fn update(&self, playlist: &Playlist) -> StoreResult<()> {
        let mut playlists = self.playlists.write().map_err(|_| StoreError::poisoned())?;
        match playlists.iter_mut().find(|p| p.id == playlist.id) {
            Some(existing) => {
                *existing = playlist.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut playlists = self.playlists.write().map_err(|_| StoreError::poisoned())?;
        let len_before = playlists.len();
        playlists.retain(|p| p.id != id);
        Ok(playlists.len() != len_before)
    }

    fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Playlist>> {
        let playlists = self.playlists.read().map_err(|_| StoreError::poisoned())?;
        let mut owned: Vec<Playlist> = playlists
            .iter()
            .filter(|p| p.owner_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
