//! Predicate composition for querypage
//!
//! Turns a search condition (a record of optional filter fields) into a
//! filter expression, skipping every absent or blank field. Composing an
//! entirely empty condition yields `None`, which matches all rows.
//!
//! # Composition strategies
//!
//! 1. Accumulator: `Conjunction::new().and_maybe(..).build()`
//! 2. List of optionals: `FilterExpr::all([..])` over per-dimension helpers
//! 3. Range helper: `between` with independently optional bounds
//!
//! # Invariants
//!
//! - No comparison is ever built against an absent operand
//! - Single-term compositions come back unwrapped, not as one-element ANDs
//! - Composition is pure: conditions are read, never mutated

mod compose;
mod expr;

pub use compose::{between, eq_opt, gt_opt, gte_opt, lt_opt, lte_opt, text_eq, Conjunction};
pub use expr::{CompareOp, Comparison, FilterExpr};
