//! # API Core
//!
//! The response envelope, the typed error signal, and pagination primitives
//! shared by every controller.

pub mod envelope;
pub mod error;
pub mod query;

pub use envelope::ApiEnvelope;
pub use error::{ApiError, ApiResult};
pub use query::{Page, PageQuery, SortOrder};

use uuid::Uuid;

/// Parse a path/body identifier, surfacing a 400-class error on bad input.
///
/// `what` names the identifier in the client-facing message, e.g.
/// `parse_id(raw, "video ID")` fails with "Invalid video ID".
pub fn parse_id(raw: &str, what: &'static str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidId(what))
}
