//! # Dashboard
//!
//! Read-only channel statistics aggregated across the subscription, video,
//! and like repositories. Every call recomputes from source data; there is
//! no caching. A channel with no videos aggregates to zeros, never a fault.

use serde::Serialize;
use uuid::Uuid;

use crate::engagement::{LikeRepository, SubscriptionRepository};
use crate::store::StoreResult;
use crate::videos::VideoRepository;

/// Channel statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_subscribers: usize,
    pub total_videos: usize,
    pub total_views: u64,
    pub total_likes: usize,
}

/// Compute the stats for one channel
pub fn channel_stats<V, S, L>(
    videos: &V,
    subscriptions: &S,
    likes: &L,
    channel_id: Uuid,
) -> StoreResult<ChannelStats>
where
    V: VideoRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
    L: LikeRepository + ?Sized,
{
    let total_subscribers = subscriptions.count_subscribers(channel_id)?;
    let total_videos = videos.count_by_owner(channel_id)?;
    let total_views = videos.sum_views_by_owner(channel_id)?;

    let video_ids = videos.ids_by_owner(channel_id)?;
    let total_likes = likes.count_for_videos(&video_ids)?;

    Ok(ChannelStats {
        total_subscribers,
        total_videos,
        total_views,
        total_likes,
    })
}
