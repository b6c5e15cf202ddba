//! # Observability
//!
//! Structured logging for the API server.

pub mod logger;

pub use logger::{Logger, Severity};
