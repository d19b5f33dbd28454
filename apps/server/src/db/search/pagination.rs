//! Page arithmetic and the paged response envelope.

use crate::{Error, Result};
use serde::Serialize;

/// How out-of-range page sizes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizePolicy {
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Clamp sizes above the maximum instead of rejecting them.
    pub clamp: bool,
}

impl From<&crate::config::SearchConfig> for PageSizePolicy {
    fn from(config: &crate::config::SearchConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            clamp: config.clamp_page_size,
        }
    }
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u32,
}

impl PageRequest {
    /// Validate `page` and `page_size`; absent values take the defaults (page 1,
    /// the configured default size).
    pub fn new(page: Option<i64>, page_size: Option<i64>, policy: &PageSizePolicy) -> Result<Self> {
        let page = match page {
            None => 1,
            Some(p) if p < 1 => {
                return Err(Error::invalid_field("page", "page must be at least 1"));
            }
            // Positive, checked above.
            Some(p) => p as u64,
        };

        let page_size = match page_size {
            None => policy.default_page_size,
            Some(s) if s < 1 => {
                return Err(Error::invalid_field(
                    "page_size",
                    "page_size must be at least 1",
                ));
            }
            Some(s) if s > i64::from(policy.max_page_size) => {
                if !policy.clamp {
                    return Err(Error::invalid_field(
                        "page_size",
                        format!("page_size must not exceed {}", policy.max_page_size),
                    ));
                }
                policy.max_page_size
            }
            // Bounded by max_page_size above.
            Some(s) => s as u32,
        };

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip: `(page - 1) * page_size`, saturating so a
    /// page past every record yields an empty window rather than an error.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(u64::from(self.page_size))
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// `ceil(total_count / page_size)`, never less than 1.
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(u64::from(page_size)).max(1)
}

/// Page metadata returned next to the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(request: &PageRequest, total_count: u64) -> Self {
        let total_pages = total_pages(total_count, request.page_size);
        Self {
            page: request.page,
            page_size: request.page_size,
            total_count,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// Paged response envelope: `{results, page, page_size, total_count, total_pages, has_next, has_prev}`.
#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
    pub results: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T> Paged<T> {
    pub fn new(results: Vec<T>, request: &PageRequest, total_count: u64) -> Self {
        Self {
            results,
            meta: PageMeta::new(request, total_count),
        }
    }
}
