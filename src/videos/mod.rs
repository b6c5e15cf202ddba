//! # Videos
//!
//! Video model and repository, including the filtered/sorted listing and
//! the per-channel aggregates the dashboard reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::query::SortOrder;
use crate::store::{StoreError, StoreResult};

/// Video model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique video identifier
    pub id: Uuid,

    /// Channel (user) that published the video
    pub owner_id: Uuid,

    pub title: String,

    pub description: String,

    /// Public URL on the media host
    pub url: String,

    /// Media host identifier, used for deletion
    pub asset_id: String,

    /// View counter
    pub views: u64,

    /// Whether the video is publicly listed
    pub is_published: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn new(
        owner_id: Uuid,
        title: String,
        description: String,
        url: String,
        asset_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            description,
            url,
            asset_id,
            views: 0,
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sort key for video listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    #[default]
    CreatedAt,
    Views,
    Title,
}

impl VideoSort {
    /// Parse a client-supplied sort key; unknown keys fall back to creation time
    pub fn parse(raw: &str) -> Self {
        match raw {
            "views" => VideoSort::Views,
            "title" => VideoSort::Title,
            _ => VideoSort::CreatedAt,
        }
    }
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    /// Restrict to one channel
    pub owner: Option<Uuid>,

    /// Case-insensitive title substring match
    pub title_query: Option<String>,
}

impl VideoFilter {
    fn matches(&self, video: &Video) -> bool {
        if let Some(owner) = self.owner {
            if video.owner_id != owner {
                return false;
            }
        }
        if let Some(query) = &self.title_query {
            if !video.title.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Video repository trait
pub trait VideoRepository: Send + Sync {
    fn insert(&self, video: &Video) -> StoreResult<()>;

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Video>>;

    /// Update an existing video; fails with `NotFound` if absent
    fn update(&self, video: &Video) -> StoreResult<()>;

    /// Delete a video; returns whether a record existed
    fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Filtered, sorted, paginated listing; returns (items, total matches)
    fn list(
        &self,
        filter: &VideoFilter,
        sort: VideoSort,
        order: SortOrder,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<Video>, usize)>;

    /// All videos of a channel, newest first
    fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Video>>;

    /// Ids of all videos of a channel
    fn ids_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Number of videos of a channel
    fn count_by_owner(&self, owner: Uuid) -> StoreResult<usize>;

    /// Summed view count across a channel's videos
    fn sum_views_by_owner(&self, owner: Uuid) -> StoreResult<u64>;
}

/// In-memory video repository for tests and development
#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    videos: std::sync::RwLock<Vec<Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VideoRepository for InMemoryVideoRepository {
    fn insert(&self, video: &Video) -> StoreResult<()> {
        let mut videos = self.videos.write().map_err(|_| StoreError::poisoned())?;
        videos.push(video.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let videos = self.videos.read().map_err(|_| StoreError::poisoned())?;
        Ok(videos.iter().find(|v| v.id == id).cloned())
    }

    fn update(&self, video: &Video) -> StoreResult<()> {
        let mut videos = self.videos.write().map_err(|_| StoreError::poisoned())?;
        match videos.iter_mut().find(|v| v.id == video.id) {
            Some(existing) => {
                *existing = video.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut videos = self.videos.write().map_err(|_| StoreError::poisoned())?;
        let len_before = videos.len();
        videos.retain(|v| v.id != id);
        Ok(videos.len() != len_before)
    }

    fn list(
        &self,
        filter: &VideoFilter,
        sort: VideoSort,
        order: SortOrder,
        offset: usize,
        limit: usize,
    ) -> StoreResult<(Vec<Video>, usize)> {
        let videos = self.videos.read().map_err(|_| StoreError::poisoned())?;

        let mut matches: Vec<Video> = videos.iter().filter(|v| filter.matches(v)).cloned().collect();
        let total = matches.len();

        matches.sort_by(|a, b| {
            let cmp = match sort {
                VideoSort::CreatedAt => a.created_at.cmp(&b.created_at),
                VideoSort::Views => a.views.cmp(&b.views),
                VideoSort::Title => a.title.cmp(&b.title),
            };
            match order {
                SortOrder::Asc => cmp,
                SortOrder::Desc => cmp.reverse(),
            }
        });

        let items = matches.into_iter().skip(offset).take(limit).collect();
        Ok((items, total))
    }

    fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Video>> {
        let videos = self.videos.read().map_err(|_| StoreError::poisoned())?;
        let mut owned: Vec<Video> = videos.iter().filter(|v| v.owner_id == owner).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    fn ids_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Uuid>> {
        let videos = self.videos.read().map_err(|_| StoreError::poisoned())?;
        Ok(videos
            .iter()
            .filter(|v| v.owner_id == owner)
            .map(|v| v.id)
            .collect())
    }

    fn count_by_owner(&self, owner: Uuid) -> StoreResult<usize> {
        let videos = self.videos.read().map_err(|_| StoreError::poisoned())?;
        Ok(videos.iter().filter(|v| v.owner_id == owner).count())
    }

    fn sum_views_by_owner(&self, owner: Uuid) -> StoreResult<u64> {
        let videos = self.videos.read().map_err(|_| StoreError::poisoned())?;
        Ok(videos
            .iter()
            .filter(|v| v.owner_id == owner)
            .map(|v| v.views)
            .sum())
    }
}
