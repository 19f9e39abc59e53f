//! Paging types for list responses
//!
//! Pages are 1-indexed. `Paging` is the metadata object returned next to a
//! page of items: `{page, total_page, total_item}`.

use serde::Serialize;

/// Page size used when the request does not name one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a request may ask for
pub const MAX_PAGE_SIZE: i64 = 100;

/// A requested window over a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (1-indexed)
    pub page: i64,
    /// Items per page
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request; callers are expected to have validated the bounds.
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Rows to take
    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Paging metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub page: i64,
    pub total_page: i64,
    pub total_item: i64,
}

impl Paging {
    pub fn new(request: PageRequest, total_item: i64) -> Self {
        Self {
            page: request.page,
            total_page: total_pages(total_item, request.size),
            total_item,
        }
    }
}

/// `ceil(total_item / size)`, never less than 1
pub fn total_pages(total_item: i64, size: i64) -> i64 {
    if size <= 0 || total_item <= 0 {
        return 1;
    }
    ((total_item + size - 1) / size).max(1)
}

/// One page of items plus its metadata
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: Paging,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_item: i64) -> Self {
        Self {
            items,
            paging: Paging::new(request, total_item),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            paging: self.paging,
        }
    }
}
