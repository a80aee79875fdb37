//! Paginated query execution for querypage
//!
//! The protocol, strict order per invocation:
//!
//! 1. Build the content descriptor via the caller's builder
//! 2. Apply the page window through the backend's pagination primitive
//! 3. Execute the content descriptor
//! 4. Resolve the total: a non-full page proves it, otherwise run the
//!    count query (dedicated builder when given, derived otherwise)
//! 5. Assemble the page: rows in executor order, original request, total
//!
//! # Invariants
//!
//! - Content is never re-sorted here
//! - Executor failures propagate verbatim; nothing is retried or logged
//! - The count-skip policy is the same for both pagination paths

mod paginator;
mod total;

pub use paginator::{Paginator, QueryExecutor, UnitOfWork};
