//! Paginated query execution
//!
//! Runs a content query with the page window applied through the backend's
//! own pagination primitive, resolves the total, and assembles the page.
//! Rows come back in executor order; nothing here re-sorts them.

use crate::page::{Page, PageRequest};

use super::total::resolve_total;

/// Runs opaque query descriptors against a backend.
///
/// The descriptor is never inspected here; it is built by the caller,
/// paginated by the backend, and executed by the backend.
pub trait QueryExecutor {
    /// Backend query descriptor
    type Query;
    /// One result row
    type Row;
    /// Backend failure, propagated verbatim
    type Error;

    /// Applies the request's offset, size, and sorts onto a descriptor
    fn apply_pagination(&self, query: Self::Query, page: &PageRequest) -> Self::Query;

    /// Executes a descriptor, returning rows in final order
    fn execute(&self, query: Self::Query) -> Result<Vec<Self::Row>, Self::Error>;

    /// Counts the rows a descriptor matches.
    ///
    /// Sort directives and any page window on the descriptor must not
    /// affect the count.
    fn count(&self, query: Self::Query) -> Result<u64, Self::Error>;
}

/// Scoped acquisition of a live executor.
///
/// The executor is valid for the duration of the closure and released on
/// every exit path, normal return or failure.
pub trait UnitOfWork {
    /// Executor available inside the scope
    type Executor;
    /// Scope failure
    type Error;

    /// Runs work against a live executor
    fn run<T, F>(&self, work: F) -> Result<T, Self::Error>
    where
        F: FnOnce(&Self::Executor) -> Result<T, Self::Error>;
}

/// Paginated query execution over an explicitly injected executor.
///
/// Builders receive the executor as their query-building context and return
/// descriptors; they never touch storage themselves, so the only runtime
/// failures are the executor's own, surfaced unchanged.
pub struct Paginator<'a, X> {
    executor: &'a X,
}

impl<'a, X: QueryExecutor> Paginator<'a, X> {
    /// Creates a paginator over the given executor
    pub fn new(executor: &'a X) -> Self {
        Self { executor }
    }

    /// Runs a content query with pagination and resolves the total.
    ///
    /// When the count query is needed, its descriptor is derived by invoking
    /// the content builder again with the page window never applied: filters
    /// and joins are preserved, and `count` ignores the sort directives.
    pub fn paginate<F>(&self, page: &PageRequest, content: F) -> Result<Page<X::Row>, X::Error>
    where
        F: Fn(&X) -> X::Query,
    {
        let paged = self
            .executor
            .apply_pagination(content(self.executor), page);
        let rows = self.executor.execute(paged)?;
        let total = resolve_total(page, rows.len() as u64, || {
            self.executor.count(content(self.executor))
        })?;
        Ok(Page::new(rows, page.clone(), Some(total)))
    }

    /// Like `paginate`, with a dedicated count query.
    ///
    /// The count builder may use a cheaper shape (fewer joins, no
    /// projection, no sort) but must keep the content query's filter
    /// semantics; that equivalence is the caller's obligation and is not
    /// verified here. The count builder is invoked only when the fetched
    /// page cannot prove the total.
    pub fn paginate_with_count<F, G>(
        &self,
        page: &PageRequest,
        content: F,
        count: G,
    ) -> Result<Page<X::Row>, X::Error>
    where
        F: FnOnce(&X) -> X::Query,
        G: FnOnce(&X) -> X::Query,
    {
        let paged = self
            .executor
            .apply_pagination(content(self.executor), page);
        let rows = self.executor.execute(paged)?;
        let total = resolve_total(page, rows.len() as u64, || {
            self.executor.count(count(self.executor))
        })?;
        Ok(Page::new(rows, page.clone(), Some(total)))
    }
}
