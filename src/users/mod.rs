//! # Users
//!
//! Platform user model and repository. Usernames are stored lowercased and
//! both username and email are unique; the password only ever exists as an
//! Argon2id hash and is never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::crypto::{hash_password, verify_password};
use crate::auth::errors::AuthResult;
use crate::store::{StoreError, StoreResult};

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Login name (unique, lowercased)
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Avatar image URL on the media host
    pub avatar_url: String,

    /// Optional cover image URL on the media host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    /// Argon2id password hash (never plaintext, never serialized)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, hashing the password
    pub fn new(
        username: String,
        email: String,
        full_name: String,
        password: &str,
        avatar_url: String,
        cover_image_url: Option<String>,
    ) -> AuthResult<Self> {
        let password_hash = hash_password(password)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_lowercase(),
            email,
            full_name,
            avatar_url,
            cover_image_url,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// User repository trait
///
/// Abstracts the persistence collaborator for users.
pub trait UserRepository: Send + Sync {
    /// Create a new user; fails with `Duplicate` if the username or email
    /// is already registered
    fn insert(&self, user: &User) -> StoreResult<()>;

    /// Find a user by their ID
    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Find a user by username or email
    fn find_by_login(&self, login: &str) -> StoreResult<Option<User>>;

    /// Check whether a username or email is already registered
    fn login_taken(&self, username: &str, email: &str) -> StoreResult<bool>;

    /// Update an existing user
    fn update(&self, user: &User) -> StoreResult<()>;
}

/// In-memory user repository for tests and development
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().map_err(|_| StoreError::poisoned())?;

        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Duplicate(
                "User with this email or username already exists".to_string(),
            ));
        }

        users.push(user.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().map_err(|_| StoreError::poisoned())?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_login(&self, login: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().map_err(|_| StoreError::poisoned())?;
        let login_lower = login.to_lowercase();
        Ok(users
            .iter()
            .find(|u| u.username == login_lower || u.email == login)
            .cloned())
    }

    fn login_taken(&self, username: &str, email: &str) -> StoreResult<bool> {
        let users = self.users.read().map_err(|_| StoreError::poisoned())?;
        let username_lower = username.to_lowercase();
        Ok(users
            .iter()
            .any(|u| u.username == username_lower || u.email == email))
    }

    fn update(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().map_err(|_| StoreError::poisoned())?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
