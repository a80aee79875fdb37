//! Page request/result model for querypage
//!
//! A `PageRequest` is a validated offset/size/sort input; a `Page` is the
//! ordered content slice it produced plus the total when known.
//!
//! # Invariants
//!
//! - Page size > 0, checked at construction
//! - Content length never exceeds the requested size when the paginator
//!   built the page
//! - Requests and pages are immutable after construction

mod request;
mod result;

pub use request::{PageError, PageRequest, SortDirection, SortSpec};
pub use result::Page;
