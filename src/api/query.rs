//! # Pagination
//!
//! Page-number pagination shared by every listing endpoint.
//!
//! Offset is `(page - 1) * limit`. The limit is clamped to `MAX_PAGE_LIMIT`
//! so an unbounded request degrades to a bounded one instead of faulting.

use serde::{Deserialize, Serialize};

/// Default page size if not specified
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Maximum page size a client can request
pub const MAX_PAGE_LIMIT: usize = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Pagination query parameters: `?page=2&limit=20`
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageQuery {
    /// Normalized (page, limit): page >= 1, 1 <= limit <= MAX_PAGE_LIMIT
    pub fn normalized(&self) -> (usize, usize) {
        (self.page.max(1), self.limit.clamp(1, MAX_PAGE_LIMIT))
    }

    /// Number of records to skip
    pub fn offset(&self) -> usize {
        let (page, limit) = self.normalized();
        (page - 1) * limit
    }
}

/// One page of a listing: bounded items plus the total match count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: usize, query: &PageQuery) -> Self {
        let (page, limit) = query.normalized();
        Self {
            items,
            total,
            page,
            limit,
        }
    }
}
