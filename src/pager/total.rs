//! Total-count resolution
//!
//! A page that is not full already proves where the result set ends, so the
//! count query runs only when the fetched page cannot. One policy for every
//! pagination path; totals are identical either way.

use crate::page::PageRequest;

/// Resolves the total row count for a fetched page.
///
/// - first page, fewer rows than the size: the content is the whole result
/// - later page, non-empty and not full: the result ends inside this page
/// - otherwise: run the count query
pub(crate) fn resolve_total<E, F>(page: &PageRequest, fetched: u64, count: F) -> Result<u64, E>
where
    F: FnOnce() -> Result<u64, E>,
{
    if page.offset() == 0 && fetched < page.size() {
        return Ok(fetched);
    }
    if page.offset() > 0 && fetched > 0 && fetched < page.size() {
        return Ok(page.offset() + fetched);
    }
    count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting(calls: &Cell<u32>, total: u64) -> impl FnOnce() -> Result<u64, String> + '_ {
        move || {
            calls.set(calls.get() + 1);
            Ok(total)
        }
    }

    #[test]
    fn test_first_page_not_full_skips_count() {
        let page = PageRequest::new(0, 5).unwrap();
        let calls = Cell::new(0);

        let total = resolve_total(&page, 2, counting(&calls, 99)).unwrap();

        assert_eq!(total, 2);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_first_page_full_runs_count() {
        let page = PageRequest::new(0, 3).unwrap();
        let calls = Cell::new(0);

        let total = resolve_total(&page, 3, counting(&calls, 10)).unwrap();

        assert_eq!(total, 10);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_later_page_not_full_derives_total() {
        let page = PageRequest::new(6, 3).unwrap();
        let calls = Cell::new(0);

        let total = resolve_total(&page, 2, counting(&calls, 99)).unwrap();

        assert_eq!(total, 8);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_later_page_empty_runs_count() {
        let page = PageRequest::new(6, 3).unwrap();
        let calls = Cell::new(0);

        let total = resolve_total(&page, 0, counting(&calls, 4)).unwrap();

        assert_eq!(total, 4);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_later_page_full_runs_count() {
        let page = PageRequest::new(3, 3).unwrap();
        let calls = Cell::new(0);

        let total = resolve_total(&page, 3, counting(&calls, 7)).unwrap();

        assert_eq!(total, 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_count_error_propagates() {
        let page = PageRequest::new(0, 3).unwrap();

        let result = resolve_total(&page, 3, || Err("count failed".to_string()));

        assert_eq!(result, Err("count failed".to_string()));
    }
}
