//! Offset pagination primitives
//!
//! Every paginated read in the system goes through `PageRequest` so the
//! page/per-page clamping is uniform across entities.

use serde::Serialize;

/// Default page size
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Maximum page size
pub const MAX_PER_PAGE: u32 = 50;

/// Validated offset-pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Create a page request, clamping page to >= 1 and per_page to 1..=50
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Page request from optional raw query values
    pub fn from_raw(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self::new(page.unwrap_or(1), per_page.unwrap_or(DEFAULT_PER_PAGE))
    }

    /// The 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// SQL OFFSET for this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// SQL LIMIT for this page
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the metadata needed to compute total pages
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Assemble a page from a result slice and the total match count
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            per_page: request.per_page(),
        }
    }

    /// An empty page for the given request
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Total number of pages for this result set
    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.total + i64::from(self.per_page) - 1) / i64::from(self.per_page)
        }
    }

    /// Whether a page after this one exists
    pub fn has_next(&self) -> bool {
        i64::from(self.page) < self.total_pages()
    }

    /// Map the item type, keeping the page metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}
