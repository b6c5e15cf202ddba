//! # Shared State
//!
//! One state value wiring every repository and collaborator, cloned into
//! each handler. The in-memory repositories stand in for the production
//! document store.

use std::sync::Arc;

use crate::auth::crypto::PasswordPolicy;
use crate::auth::session::InMemorySessionRepository;
use crate::auth::AuthService;
use crate::comments::InMemoryCommentRepository;
use crate::config::AppConfig;
use crate::engagement::{InMemoryLikeRepository, InMemorySubscriptionRepository};
use crate::media::{LocalMediaStore, MediaStore};
use crate::playlists::InMemoryPlaylistRepository;
use crate::tweets::InMemoryTweetRepository;
use crate::users::InMemoryUserRepository;
use crate::videos::InMemoryVideoRepository;

/// The auth service as wired into the server
pub type SharedAuthService = AuthService<InMemoryUserRepository, InMemorySessionRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<InMemoryUserRepository>,
    pub videos: Arc<InMemoryVideoRepository>,
    pub tweets: Arc<InMemoryTweetRepository>,
    pub comments: Arc<InMemoryCommentRepository>,
    pub playlists: Arc<InMemoryPlaylistRepository>,
    pub likes: Arc<InMemoryLikeRepository>,
    pub subscriptions: Arc<InMemorySubscriptionRepository>,
    pub auth: Arc<SharedAuthService>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Wire up fresh repositories and collaborators from configuration
    pub fn new(config: AppConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());

        let auth = Arc::new(AuthService::new(
            users.clone(),
            InMemorySessionRepository::new(),
            config.auth.jwt_config(),
            config.auth.session_config(),
            PasswordPolicy::default(),
        ));

        let media: Arc<dyn MediaStore> =
            Arc::new(LocalMediaStore::new(config.media.media_config()));

        Self {
            config: Arc::new(config),
            users,
            videos: Arc::new(InMemoryVideoRepository::new()),
            tweets: Arc::new(InMemoryTweetRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            playlists: Arc::new(InMemoryPlaylistRepository::new()),
            likes: Arc::new(InMemoryLikeRepository::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepository::new()),
            auth,
            media,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wires_up() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(state.config.http.port, 8080);
    }
}
