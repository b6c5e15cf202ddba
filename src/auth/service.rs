//! # Auth Service
//!
//! Combines the user repository, session manager, and JWT manager into the
//! credential-verification collaborator consumed by the HTTP layer.

use std::sync::Arc;

use uuid::Uuid;

use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager};
use super::session::{SessionConfig, SessionManager, SessionRepository, TokenPair};
use crate::users::{User, UserRepository};

/// Actor identity yielded by access-token validation
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user_id: Uuid,
    pub username: String,
}

/// Auth service combining all auth components
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    user_repo: Arc<U>,
    session_manager: SessionManager<S>,
    jwt_manager: JwtManager,
    password_policy: PasswordPolicy,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn new(
        user_repo: Arc<U>,
        session_repo: S,
        jwt_config: JwtConfig,
        session_config: SessionConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            user_repo,
            session_manager: SessionManager::new(session_config, session_repo),
            jwt_manager: JwtManager::new(jwt_config),
            password_policy,
        }
    }

    /// The password policy applied at registration
    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    /// Issue a fresh token pair for a user (after registration or login)
    pub fn issue_tokens(&self, user: &User) -> AuthResult<TokenPair> {
        let access_token = self.jwt_manager.generate_access_token(user)?;
        let (_, refresh_token) = self.session_manager.create_session(user.id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at: self.jwt_manager.get_expiration(),
        })
    }

    /// Authenticate with username-or-email and password
    ///
    /// Failure is always `InvalidCredentials`; whether the login or the
    /// password was wrong is not revealed.
    pub fn login(&self, login: &str, password: &str) -> AuthResult<(User, TokenPair)> {
        let user = self
            .user_repo
            .find_by_login(login)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_tokens(&user)?;
        Ok((user, tokens))
    }

    /// Rotate a refresh token into a fresh token pair
    pub fn refresh(&self, refresh_token: &str) -> AuthResult<(User, TokenPair)> {
        let (session, new_refresh_token) = self.session_manager.refresh_session(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)?
            .ok_or(AuthError::SessionInvalid)?;

        let access_token = self.jwt_manager.generate_access_token(&user)?;

        Ok((
            user,
            TokenPair {
                access_token,
                refresh_token: new_refresh_token,
                expires_at: self.jwt_manager.get_expiration(),
            },
        ))
    }

    /// Revoke the session behind a refresh token (logout, idempotent)
    pub fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        self.session_manager.revoke_by_token(refresh_token)
    }

    /// Validate a bearer access token and yield the actor identity
    pub fn validate_access_token(&self, token: &str) -> AuthResult<Authenticated> {
        let claims = self.jwt_manager.validate_token(token)?;
        let user_id = JwtManager::get_user_id(&claims)?;

        Ok(Authenticated {
            user_id,
            username: claims.username,
        })
    }

    /// Load a user by id
    pub fn get_user(&self, id: Uuid) -> AuthResult<User> {
        self.user_repo
            .find_by_id(id)?
            .ok_or(AuthError::SessionInvalid)
    }
}
