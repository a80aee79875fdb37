//! In-memory query backend for querypage
//!
//! Reference implementation of the executor and unit-of-work seams over
//! in-process JSON collections. Useful on its own for tests and as the
//! semantics other backends should match.
//!
//! # Query pipeline (strict order)
//!
//! 1. Left-join each directive, embedding the first match under its alias
//! 2. Filter strictly (no coercion; missing fields and nulls never match)
//! 3. Sort, stable and multi-key
//! 4. Apply the offset/limit window
//! 5. Project to the selected fields, when any
//!
//! Counting stops after step 2.

mod errors;
mod eval;
mod query;
mod sort;
mod store;

pub use errors::{MemoryError, MemoryResult};
pub use query::{Join, MemoryQuery, SelectField};
pub use store::MemoryStore;
