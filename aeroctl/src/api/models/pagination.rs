//! Shared pagination types for console list endpoints.
//!
//! The console pages with a 1-based `currentPage` and a `pageSize`. Both are optional on the
//! wire; missing, zero or negative values fall back to the defaults instead of failing the
//! request, and pages past the end of the result set come back empty.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Default number of items returned per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Pages are numbered from one.
pub const FIRST_PAGE: i64 = 1;

/// Pagination parameters as sent by the console.
///
/// Values are accepted either as JSON numbers or as numeric strings, since form inputs in the
/// console tend to hand over strings.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number, starting at 1 (default: 1)
    #[param(default = 1, minimum = 1)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,

    /// Items per page (default: 10)
    #[param(default = 10, minimum = 1)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl PageRequest {
    pub fn new(current_page: i64, page_size: i64) -> Self {
        Self {
            current_page: Some(current_page),
            page_size: Some(page_size),
        }
    }

    /// Get the page number, defaulting to the first page when absent or not positive.
    #[inline]
    pub fn current_page(&self) -> i64 {
        self.current_page.filter(|page| *page > 0).unwrap_or(FIRST_PAGE)
    }

    /// Get the page size, using `default` when absent or not positive.
    #[inline]
    pub fn page_size_or(&self, default: i64) -> i64 {
        self.page_size.filter(|size| *size > 0).unwrap_or(default.max(1))
    }

    /// Resolve into the effective page window.
    pub fn resolve(&self, default_page_size: i64) -> PageSpec {
        PageSpec {
            current_page: self.current_page(),
            page_size: self.page_size_or(default_page_size),
        }
    }
}

/// An effective page window: both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub current_page: i64,
    pub page_size: i64,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageRequest::default().resolve(DEFAULT_PAGE_SIZE)
    }
}

impl PageSpec {
    /// Zero-based offset of the first item, `(page - 1) * size`.
    ///
    /// Saturates rather than overflowing, which simply produces an empty page.
    pub fn offset(&self) -> usize {
        (self.current_page - 1)
            .checked_mul(self.page_size)
            .and_then(|offset| usize::try_from(offset).ok())
            .unwrap_or(usize::MAX)
    }

    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items for the current page
    pub list: Vec<T>,
    /// Number of items matching the filters (before pagination)
    pub total: usize,
    /// Effective page size
    pub page_size: i64,
    /// Effective page number
    pub current_page: i64,
}

impl<T> Page<T> {
    pub fn new(list: Vec<T>, total: usize, spec: PageSpec) -> Self {
        Self {
            list,
            total,
            page_size: spec.page_size,
            current_page: spec.current_page,
        }
    }
}
