//! Page requests and the page envelope.

use serde::{Deserialize, Serialize};

use crate::sort::{Direction, Sort};

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    ZeroSize,
}

/// A zero-based page index, a page size and a sort specification.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, Sort};
///
/// let request = PageRequest::new(1, 5, Sort::desc("criadoEm")).expect("valid request");
/// assert_eq!(request.offset(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<K> {
    page: u32,
    size: u32,
    sort: Sort<K>,
}

impl<K> PageRequest<K> {
    /// Build a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroSize`] when `size` is zero.
    pub fn new(page: u32, size: u32, sort: Sort<K>) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        Ok(Self { page, size, sort })
    }

    /// Zero-based page index.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of records on the page.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Sort applied before slicing.
    pub const fn sort(&self) -> &Sort<K> {
        &self.sort
    }

    /// Number of records skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page).saturating_mul(u64::from(self.size))
    }
}

/// Serialisable summary of the sort that produced a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Property name as exposed to clients.
    pub property: String,
    /// Direction applied to the property.
    pub direction: Direction,
}

/// One page of records plus navigation totals.
///
/// Serialised in camelCase: `content`, `number`, `size`, `totalElements`,
/// `totalPages`, `numberOfElements`, `first`, `last`, `empty`, `sort`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page, in sort order.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Records matching the query across all pages.
    pub total_elements: u64,
    /// Pages needed to hold `total_elements` at `size` per page.
    pub total_pages: u64,
    /// Records on this page.
    pub number_of_elements: usize,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether no page follows this one.
    pub last: bool,
    /// Whether this page holds no records.
    pub empty: bool,
    /// Sort applied to the records.
    pub sort: SortOrder,
}

impl<T> Page<T> {
    /// Assemble a page from its content, the request and the total count.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest, Sort};
    ///
    /// let request = PageRequest::new(0, 2, Sort::desc("criadoEm")).expect("valid request");
    /// let page = Page::new(vec!["a", "b"], &request, 5);
    /// assert_eq!(page.total_pages, 3);
    /// assert!(page.first);
    /// assert!(!page.last);
    /// ```
    pub fn new<K: AsRef<str>>(content: Vec<T>, request: &PageRequest<K>, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size()));
        let number_of_elements = content.len();
        Self {
            empty: content.is_empty(),
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
            total_pages,
            number_of_elements,
            first: request.page() == 0,
            last: u64::from(request.page()).saturating_add(1) >= total_pages,
            sort: SortOrder {
                property: request.sort().property().as_ref().to_owned(),
                direction: request.sort().direction(),
            },
        }
    }

    /// Convert every record, keeping the navigation totals.
    pub fn map<U>(self, convert: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(convert).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
            sort: self.sort,
        }
    }
}
