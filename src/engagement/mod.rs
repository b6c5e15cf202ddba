//! # Engagement
//!
//! Join relations (likes, subscriptions) and the toggle protocol that
//! drives like/unlike and subscribe/unsubscribe.

pub mod like;
pub mod subscription;
pub mod toggle;

pub use like::{InMemoryLikeRepository, Like, LikeRepository, LikeTarget};
pub use subscription::{InMemorySubscriptionRepository, Subscription, SubscriptionRepository};
pub use toggle::{toggle, JoinStore, ToggleOutcome};
