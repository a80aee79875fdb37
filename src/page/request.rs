//! Page request model
//!
//! Offset, size, and sort directives for one page of results. Invalid sizes
//! are rejected here, before any query is built.

use thiserror::Error;

/// Page request precondition failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A page must hold at least one row
    #[error("page size must be greater than zero")]
    ZeroSize,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field path to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Offset/size/sort specification for one page.
///
/// Size is validated at construction; offsets are unsigned so a negative
/// offset is unrepresentable. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    size: u64,
    sorts: Vec<SortSpec>,
}

impl PageRequest {
    /// Creates a page request; size must be greater than zero
    pub fn new(offset: u64, size: u64) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::ZeroSize);
        }
        Ok(Self {
            offset,
            size,
            sorts: Vec::new(),
        })
    }

    /// Appends a sort directive; earlier directives take priority
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Row offset of the first content row
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of content rows
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Sort directives in priority order
    pub fn sorts(&self) -> &[SortSpec] {
        &self.sorts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(PageError::ZeroSize));
        assert_eq!(PageRequest::new(10, 0), Err(PageError::ZeroSize));
    }

    #[test]
    fn test_request_accessors() {
        let page = PageRequest::new(6, 3).unwrap();
        assert_eq!(page.offset(), 6);
        assert_eq!(page.size(), 3);
        assert!(page.sorts().is_empty());
    }

    #[test]
    fn test_sorts_keep_priority_order() {
        let page = PageRequest::new(0, 10)
            .unwrap()
            .with_sort(SortSpec::desc("age"))
            .with_sort(SortSpec::asc("name"));

        assert_eq!(page.sorts().len(), 2);
        assert_eq!(page.sorts()[0], SortSpec::desc("age"));
        assert_eq!(page.sorts()[1], SortSpec::asc("name"));
    }

    #[test]
    fn test_sort_spec_constructors() {
        let spec = SortSpec::asc("age");
        assert_eq!(spec.field, "age");
        assert_eq!(spec.direction, SortDirection::Asc);
        assert_eq!(spec.direction.as_str(), "asc");

        let spec = SortSpec::desc("name");
        assert_eq!(spec.direction, SortDirection::Desc);
        assert_eq!(spec.direction.as_str(), "desc");
    }
}
