//! querypage - null-safe filter composition and paginated query execution
//!
//! Builds conjunctions from search conditions whose fields are all optional,
//! and runs content/count query pairs against a pluggable executor, skipping
//! the count query whenever a non-full page already proves the total.

pub mod filter;
pub mod memory;
pub mod page;
pub mod pager;
