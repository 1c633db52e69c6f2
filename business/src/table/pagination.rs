//! Page slicing for the table body.

use std::ops::Range;

use super::TableError;

/// Selectable rows-per-page values.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page and page size. Pages are zero based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    rows_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Number of pages for `total` rows. An empty table still has one page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page).max(1)
    }

    /// Moves to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// Changes the page size and always returns to the first page.
    pub fn set_rows_per_page(&mut self, size: usize) -> Result<(), TableError> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(TableError::UnsupportedPageSize { size });
        }
        self.rows_per_page = size;
        self.page = 0;
        Ok(())
    }

    /// Keeps the current page if it still exists, else the last page.
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    /// Index range of the current page within `total` rows.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.rows_per_page).min(total);
        let end = (start + self.rows_per_page).min(total);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page + 1 < self.page_count(total)
    }
}
