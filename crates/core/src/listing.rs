//! Paginated listings.

use serde::Serialize;

/// Page numbers as seen by callers start at one.
///
/// Returns the zero-based index used by the repositories. A missing or zero
/// page means the first page.
#[must_use]
pub fn page_index(page: Option<u64>) -> u64 {
    page.unwrap_or(1).max(1) - 1
}

/// One page of a newest-first listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// One-based page number.
    pub current_page: u64,
    pub per_page: u64,
    /// Items across all pages.
    pub total: u64,
    /// Never below one, even for an empty listing.
    pub last_page: u64,
}

impl<T> Page<T> {
    /// Build from a zero-based page index.
    #[must_use]
    pub fn new(data: Vec<T>, index: u64, per_page: u64, total: u64) -> Self {
        let per_page = per_page.max(1);
        Self {
            data,
            current_page: index + 1,
            per_page,
            total,
            last_page: total.div_ceil(per_page).max(1),
        }
    }

    /// Convert every item, keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
        }
    }
}
