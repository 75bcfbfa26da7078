//! The backend's pagination envelope.
//!
//! Every list endpoint wraps a page of results as
//! `{data, totalItems, totalPages, currentPage, itemsPerPage}`. The envelope
//! is validated on deserialization so that page math in the views can rely on
//! its invariants:
//!
//! - `itemsPerPage > 0`
//! - `data.len() <= itemsPerPage`
//! - `totalPages == ceil(totalItems / itemsPerPage)`
//! - `1 <= currentPage <= totalPages` whenever `totalItems > 0`

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways a pagination envelope can violate its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("itemsPerPage must be positive")]
    ZeroPageSize,
    #[error("page holds {len} items but itemsPerPage is {per_page}")]
    Overfull { len: usize, per_page: u32 },
    #[error("totalPages is {actual} but {total_items} items at {per_page} per page need {expected}")]
    PageCount {
        total_items: u64,
        per_page: u32,
        expected: u64,
        actual: u32,
    },
    #[error("currentPage {current} is outside 1..={total_pages}")]
    CurrentOutOfRange { current: u32, total_pages: u32 },
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "RawPage<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Paginated<T> {
    data: Vec<T>,
    total_items: u64,
    total_pages: u32,
    current_page: u32,
    items_per_page: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    data: Vec<T>,
    total_items: u64,
    total_pages: u32,
    current_page: u32,
    items_per_page: u32,
}

impl<T> TryFrom<RawPage<T>> for Paginated<T> {
    type Error = PageError;

    fn try_from(raw: RawPage<T>) -> Result<Self, Self::Error> {
        Self::new(
            raw.data,
            raw.total_items,
            raw.total_pages,
            raw.current_page,
            raw.items_per_page,
        )
    }
}

impl<T> Paginated<T> {
    /// Build an envelope, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] describing the first violated invariant.
    pub fn new(
        data: Vec<T>,
        total_items: u64,
        total_pages: u32,
        current_page: u32,
        items_per_page: u32,
    ) -> Result<Self, PageError> {
        if items_per_page == 0 {
            return Err(PageError::ZeroPageSize);
        }
        if data.len() > items_per_page as usize {
            return Err(PageError::Overfull {
                len: data.len(),
                per_page: items_per_page,
            });
        }
        let expected = total_items.div_ceil(u64::from(items_per_page));
        if expected != u64::from(total_pages) {
            return Err(PageError::PageCount {
                total_items,
                per_page: items_per_page,
                expected,
                actual: total_pages,
            });
        }
        if total_items > 0 && !(1..=total_pages).contains(&current_page) {
            return Err(PageError::CurrentOutOfRange {
                current: current_page,
                total_pages,
            });
        }

        Ok(Self {
            data,
            total_items,
            total_pages,
            current_page,
            items_per_page,
        })
    }

    /// An empty first page.
    #[must_use]
    pub const fn empty(items_per_page: u32) -> Self {
        Self {
            data: Vec::new(),
            total_items: 0,
            total_pages: 0,
            current_page: 1,
            items_per_page: if items_per_page == 0 { 1 } else { items_per_page },
        }
    }

    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 1-based index of the first item on this page, or 0 when there are none.
    #[must_use]
    pub fn range_start(&self) -> u64 {
        if self.total_items == 0 {
            return 0;
        }
        u64::from(self.current_page - 1) * u64::from(self.items_per_page) + 1
    }

    /// 1-based index of the last item on this page.
    #[must_use]
    pub fn range_end(&self) -> u64 {
        (u64::from(self.current_page) * u64::from(self.items_per_page)).min(self.total_items)
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Window of page numbers to offer as direct links.
    #[must_use]
    pub fn window(&self, width: u32) -> PageWindow {
        PageWindow::around(self.current_page, self.total_pages, width)
    }
}

/// A contiguous run of page numbers centred on the current page where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first: u32,
    pub last: u32,
}

impl PageWindow {
    /// Compute the window of at most `width` pages around `current`.
    ///
    /// Returns an empty window (`first > last`) when there are no pages.
    #[must_use]
    pub fn around(current: u32, total_pages: u32, width: u32) -> Self {
        if total_pages == 0 || width == 0 {
            return Self { first: 1, last: 0 };
        }
        let width = width.min(total_pages);
        let current = current.clamp(1, total_pages);
        let first = current
            .saturating_sub(width / 2)
            .max(1)
            .min(total_pages - width + 1);
        Self {
            first,
            last: first + width - 1,
        }
    }

    /// Iterate the page numbers in the window.
    pub fn pages(self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_consistent_envelope() {
        let page = Paginated::new(vec![1, 2], 26, 3, 3, 12).unwrap();
        assert_eq!(page.range_start(), 25);
        assert_eq!(page.range_end(), 26);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for (total, per_page) in [(0_u64, 12_u32), (1, 12), (12, 12), (13, 12), (100, 7)] {
            let pages = u32::try_from(total.div_ceil(u64::from(per_page))).unwrap();
            let current = pages.max(1);
            assert!(Paginated::<u8>::new(Vec::new(), total, pages, current, per_page).is_ok());
            assert_eq!(
                Paginated::<u8>::new(Vec::new(), total, pages + 1, current, per_page),
                Err(PageError::PageCount {
                    total_items: total,
                    per_page,
                    expected: u64::from(pages),
                    actual: pages + 1,
                })
            );
        }
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert_eq!(
            Paginated::<u8>::new(Vec::new(), 0, 0, 1, 0),
            Err(PageError::ZeroPageSize)
        );
    }

    #[test]
    fn test_rejects_current_page_out_of_range() {
        assert!(matches!(
            Paginated::<u8>::new(Vec::new(), 10, 1, 2, 12),
            Err(PageError::CurrentOutOfRange { .. })
        ));
        assert!(matches!(
            Paginated::<u8>::new(Vec::new(), 10, 1, 0, 12),
            Err(PageError::CurrentOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_overfull_page() {
        assert!(matches!(
            Paginated::new(vec![1, 2, 3], 3, 2, 1, 2),
            Err(PageError::Overfull { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Paginated<u32> = serde_json::from_str(
            r#"{"data":[1,2],"totalItems":2,"totalPages":1,"currentPage":1,"itemsPerPage":12}"#,
        )
        .unwrap();
        assert_eq!(ok.data(), &[1, 2]);

        let bad = serde_json::from_str::<Paginated<u32>>(
            r#"{"data":[],"totalItems":30,"totalPages":1,"currentPage":1,"itemsPerPage":12}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_empty_page_has_zero_range() {
        let page = Paginated::<u8>::empty(12);
        assert_eq!(page.range_start(), 0);
        assert_eq!(page.range_end(), 0);
        assert!(page.window(5).pages().next().is_none());
    }

    #[test]
    fn test_window_centres_on_current() {
        assert_eq!(PageWindow::around(1, 3, 5), PageWindow { first: 1, last: 3 });
        assert_eq!(PageWindow::around(1, 10, 5), PageWindow { first: 1, last: 5 });
        assert_eq!(PageWindow::around(6, 10, 5), PageWindow { first: 4, last: 8 });
        assert_eq!(PageWindow::around(10, 10, 5), PageWindow { first: 6, last: 10 });
        assert_eq!(PageWindow::around(99, 10, 5), PageWindow { first: 6, last: 10 });
    }
}
