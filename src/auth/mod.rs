//! # Authentication
//!
//! Credential verification collaborator: argon2 password hashing, HS256
//! access tokens, and hashed single-use refresh tokens. The HTTP layer only
//! consumes `AuthService::validate_access_token`; everything else is wiring
//! for the user-facing login/refresh/logout endpoints.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;
pub mod session;

pub use errors::{AuthError, AuthResult};
pub use service::{AuthService, Authenticated};
pub use session::{Session, SessionConfig, SessionRepository, TokenPair};
