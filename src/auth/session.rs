//! # Session Management
//!
//! Refresh-token sessions. Refresh tokens are single-use, stored hashed,
//! and expire at their stated time; logout revokes immediately.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};
use super::errors::{AuthError, AuthResult};
use crate::store::StoreError;

/// Session model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// Hashed refresh token (raw token given to client)
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,

    /// Whether the session has been revoked
    pub revoked: bool,
}

/// Token pair returned to the client on login/refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// JWT access token (short-lived)
    pub access_token: String,

    /// Refresh token (long-lived, single-use)
    pub refresh_token: String,

    /// Access token expiration timestamp
    pub expires_at: DateTime<Utc>,
}

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_token_ttl: Duration::days(30),
        }
    }
}

/// Session repository trait
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    fn create(&self, session: &Session) -> Result<(), StoreError>;

    /// Find a session by its refresh token hash
    fn find_by_refresh_token_hash(&self, hash: &str) -> Result<Option<Session>, StoreError>;

    /// Mark a session revoked
    fn revoke(&self, id: Uuid) -> Result<(), StoreError>;

    /// Revoke every session belonging to a user
    fn revoke_all_for_user(&self, user_id: Uuid) -> Result<(), StoreError>;
}

/// Session manager handles session creation, rotation, and revocation
pub struct SessionManager<R: SessionRepository> {
    config: SessionConfig,
    repository: R,
}

impl<R: SessionRepository> SessionManager<R> {
    pub fn new(config: SessionConfig, repository: R) -> Self {
        Self { config, repository }
    }

    /// Create a new session for a user
    ///
    /// Returns the raw refresh token (not hashed) to give to the client.
    pub fn create_session(&self, user_id: Uuid) -> AuthResult<(Session, String)> {
        let refresh_token = generate_token();
        let refresh_token_hash = hash_token(&refresh_token);

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            refresh_token_hash,
            created_at: now,
            expires_at: now + self.config.refresh_token_ttl,
            revoked: false,
        };

        self.repository.create(&session)?;

        Ok((session, refresh_token))
    }

    /// Rotate a session using its refresh token
    ///
    /// Refresh tokens are single-use: the old session is revoked before the
    /// replacement is issued.
    pub fn refresh_session(&self, refresh_token: &str) -> AuthResult<(Session, String)> {
        let token_hash = hash_token(refresh_token);

        let old_session = self
            .repository
            .find_by_refresh_token_hash(&token_hash)?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if old_session.revoked {
            return Err(AuthError::SessionRevoked);
        }

        if old_session.expires_at < Utc::now() {
            return Err(AuthError::SessionInvalid);
        }

        self.repository.revoke(old_session.id)?;

        self.create_session(old_session.user_id)
    }

    /// Revoke the session holding this refresh token (logout)
    ///
    /// Logout is idempotent: an unknown token is a no-op success.
    pub fn revoke_by_token(&self, refresh_token: &str) -> AuthResult<()> {
        let token_hash = hash_token(refresh_token);

        if let Some(session) = self.repository.find_by_refresh_token_hash(&token_hash)? {
            self.repository.revoke(session.id)?;
        }
        Ok(())
    }

    /// Revoke all sessions for a user
    pub fn revoke_all_user_sessions(&self, user_id: Uuid) -> AuthResult<()> {
        Ok(self.repository.revoke_all_for_user(user_id)?)
    }
}

/// In-memory session repository for tests and development
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: std::sync::RwLock<Vec<Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn create(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().map_err(|_| StoreError::poisoned())?;
        sessions.push(session.clone());
        Ok(())
    }

    fn find_by_refresh_token_hash(&self, hash: &str) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().map_err(|_| StoreError::poisoned())?;
        Ok(sessions
            .iter()
            .find(|s| s.refresh_token_hash == hash)
            .cloned())
    }

    fn revoke(&self, id: Uuid) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().map_err(|_| StoreError::poisoned())?;
        match sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.revoked = true;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn revoke_all_for_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().map_err(|_| StoreError::poisoned())?;
        for session in sessions.iter_mut().filter(|s| s.user_id == user_id) {
            session.revoked = true;
        }
        Ok(())
    }
}
