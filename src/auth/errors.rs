//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================
    /// Wrong login or password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Session Errors
    // ==================
    /// Session not found or expired
    #[error("Session expired or invalid")]
    SessionInvalid,

    /// Refresh token is invalid or already used
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Session has been revoked
    #[error("Session has been revoked")]
    SessionRevoked,

    // ==================
    // Token Errors
    // ==================
    /// Access token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// Access token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Access token signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Route requires an authenticated actor
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Actor is not allowed to touch this resource
    #[error("Not authorized to access this resource")]
    Unauthorized,

    // ==================
    // Internal Errors
    // ==================
    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,
            AuthError::MalformedToken => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::SessionInvalid => 401,
            AuthError::InvalidRefreshToken => 401,
            AuthError::SessionRevoked => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::AuthenticationRequired => 401,

            // 403 Forbidden
            AuthError::Unauthorized => 403,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<crate::store::StoreError> for AuthError {
    fn from(err: crate::store::StoreError) -> Self {
        AuthError::StorageError(err.to_string())
    }
}
