//! Page-numbered pagination.
//!
//! Collection endpoints are paged by number: the request carries
//! `page[number]` / `page[size]` and the response reports its position in
//! `meta.pagination`. [`Page<T>`] pairs the decoded items with that metadata
//! and implements `Deref<Target = [T]>` so it can be used like a slice:
//!
//! ```rust
//! use scalr_api::jsonapi::{Page, Pagination};
//!
//! let page = Page::new(
//!     vec!["env-1", "env-2"],
//!     Pagination {
//!         current_page: 1,
//!         next_page: Some(2),
//!         total_pages: 2,
//!         total_count: 3,
//!         ..Pagination::default()
//!     },
//! );
//!
//! assert_eq!(page.len(), 2);
//! assert_eq!(page[0], "env-1");
//! assert!(page.has_next_page());
//! ```
//!
//! A page number past the last page is not an error: the result is empty and
//! [`Page::current_page`] still reports the requested number.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// The `meta.pagination` object of a collection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Pagination {
    /// The page this response holds (1-based).
    pub current_page: u32,
    /// The previous page, if any.
    pub prev_page: Option<u32>,
    /// The next page, if any.
    pub next_page: Option<u32>,
    /// Number of pages in the collection.
    pub total_pages: u32,
    /// Number of items in the collection.
    pub total_count: u64,
}

impl Pagination {
    /// Metadata for an empty result at `requested_page`.
    #[must_use]
    pub const fn empty(requested_page: u32) -> Self {
        Self {
            current_page: requested_page,
            prev_page: None,
            next_page: None,
            total_pages: 0,
            total_count: 0,
        }
    }
}

/// Page selection for list options, encoded as `page[number]` / `page[size]`.
///
/// ```rust
/// use scalr_api::jsonapi::PageOptions;
///
/// let page = PageOptions::new(3).with_size(50);
/// assert_eq!(page.requested_page(), 3);
/// assert_eq!(PageOptions::default().requested_page(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    /// The 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// The page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl PageOptions {
    /// Requests page `number`.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self {
            number: Some(number),
            size: None,
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// The page number the server will be asked for (defaults to 1).
    #[must_use]
    pub fn requested_page(&self) -> u32 {
        self.number.unwrap_or(1)
    }
}

/// A page of a collection.
///
/// Items keep the server's order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> Page<T> {
    /// Wraps decoded items with their pagination metadata.
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// An empty page reporting `requested_page` as current.
    #[must_use]
    pub const fn empty(requested_page: u32) -> Self {
        Self::new(Vec::new(), Pagination::empty(requested_page))
    }

    /// Returns the items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the pagination metadata.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The page this result holds.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.pagination.current_page
    }

    /// Number of pages in the collection.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }

    /// Number of items in the collection.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.pagination.total_count
    }

    /// The next page number, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        self.pagination.next_page
    }

    /// The previous page number, if any.
    #[must_use]
    pub const fn prev_page(&self) -> Option<u32> {
        self.pagination.prev_page
    }

    /// Returns `true` if the server reported a next page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.pagination.next_page.is_some()
    }

    /// Maps the items, preserving pagination.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
