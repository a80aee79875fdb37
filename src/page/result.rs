//! Page result types

use super::request::PageRequest;

/// One page of rows, the request that produced it, and the total.
///
/// The total is `None` when it was never computed; the paginator always
/// fills it in, either from a count query or from a non-full page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total: Option<u64>,
}

impl<T> Page<T> {
    /// Creates a page
    pub fn new(content: Vec<T>, request: PageRequest, total: Option<u64>) -> Self {
        Self {
            content,
            request,
            total,
        }
    }

    /// Content rows in executor order
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consumes the page, returning its content rows
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// The request that produced this page
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Total matching rows across all pages, when computed
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Number of content rows in this page
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if this page holds no rows
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Projects every content row, keeping request and total.
    ///
    /// This is how raw rows become typed records: projection is an explicit
    /// function supplied by the caller.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total: self.total,
        }
    }

    /// Projects every content row through a fallible function.
    ///
    /// The first row failure aborts the projection and surfaces unchanged.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let mut content = Vec::with_capacity(self.content.len());
        for row in self.content {
            content.push(f(row)?);
        }
        Ok(Page {
            content,
            request: self.request,
            total: self.total,
        })
    }
}
