//! # Store Errors
//!
//! Shared error type for the persistence collaborator.
//!
//! The platform treats its document store as an external collaborator behind
//! per-entity repository traits (see `users`, `videos`, `engagement`, ...).
//! Every repository operation returns a `StoreResult`; the in-memory
//! implementations used for tests and development map lock poisoning and
//! constraint violations onto the same variants a remote store would produce.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the persistence collaborator
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The targeted record does not exist
    #[error("Record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    Duplicate(String),

    /// The store failed in a way the caller cannot recover from
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Shorthand for the lock-poisoned case in the in-memory repositories
    pub fn poisoned() -> Self {
        StoreError::Unavailable("Lock poisoned".to_string())
    }
}
