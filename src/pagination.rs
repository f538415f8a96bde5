//! Offset pagination shared by task and comment listings.

use crate::config::PaginationConfig;
use serde::Serialize;
use thiserror::Error;

/// Error returned when a page window is not strictly positive.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("page and limit must both be at least 1 (got page {page}, limit {limit})")]
pub struct InvalidPageRequest {
    /// Requested page.
    pub page: u32,
    /// Requested limit.
    pub limit: u32,
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a strict page window.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageRequest`] when `page` or `limit` is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, InvalidPageRequest> {
        if page == 0 || limit == 0 {
            return Err(InvalidPageRequest { page, limit });
        }
        Ok(Self { page, limit })
    }

    /// Creates a page window, raising zero values to 1.
    #[must_use]
    pub fn at_least_one(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Builds a window from optional query parameters.
    ///
    /// Missing values take the configured defaults, the limit is clamped to
    /// the configured maximum, and zeros are raised to 1.
    #[must_use]
    pub fn from_query(page: Option<u32>, limit: Option<u32>, config: &PaginationConfig) -> Self {
        let limit = limit
            .unwrap_or(config.default_limit)
            .min(config.max_limit.max(1));
        Self::at_least_one(page.unwrap_or(1), limit)
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::at_least_one(1, PaginationConfig::default().default_limit)
    }
}

/// A page of results plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Number of matching records across all pages.
    pub total: u64,
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Slices an in-memory result set to the requested window.
    #[must_use]
    pub fn from_sorted(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        Self {
            items: items.into_iter().skip(skip).take(take).collect(),
            total,
            page: request.page(),
            limit: request.limit(),
        }
    }

    /// Maps every item, keeping the window metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}
