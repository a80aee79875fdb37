//! Null-safe composition of filter expressions
//!
//! A search condition is a record where every filter field is optional.
//! Only present fields contribute comparisons; an entirely empty condition
//! composes to no filter at all, which matches every row. Blank text counts
//! as absent.
//!
//! Two styles, interchangeable per call site:
//! - accumulator: start from an empty `Conjunction` and AND terms in
//! - list of optionals: one helper per dimension, collected with
//!   `FilterExpr::all`

use serde_json::Value;

use super::expr::FilterExpr;

/// Imperative conjunction accumulator.
///
/// Terms are kept in insertion order so composition is deterministic.
#[derive(Debug, Default)]
pub struct Conjunction {
    terms: Vec<FilterExpr>,
}

impl Conjunction {
    /// Creates an empty conjunction
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// ANDs in an expression
    pub fn and(mut self, expr: FilterExpr) -> Self {
        self.terms.push(expr);
        self
    }

    /// ANDs in an expression when present; absence contributes nothing
    pub fn and_maybe(mut self, expr: Option<FilterExpr>) -> Self {
        if let Some(expr) = expr {
            self.terms.push(expr);
        }
        self
    }

    /// Returns true if no term was added
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Builds the accumulated expression.
    ///
    /// `None` when empty; a single term is returned unwrapped.
    pub fn build(mut self) -> Option<FilterExpr> {
        match self.terms.len() {
            0 => None,
            1 => Some(self.terms.remove(0)),
            _ => Some(FilterExpr::And(self.terms)),
        }
    }
}

/// Equality comparison when the operand is present
pub fn eq_opt(field: &str, value: Option<impl Into<Value>>) -> Option<FilterExpr> {
    value.map(|v| FilterExpr::eq(field, v.into()))
}

/// Greater-than comparison when the operand is present
pub fn gt_opt(field: &str, value: Option<impl Into<Value>>) -> Option<FilterExpr> {
    value.map(|v| FilterExpr::gt(field, v.into()))
}

/// Greater-or-equal comparison when the operand is present
pub fn gte_opt(field: &str, value: Option<impl Into<Value>>) -> Option<FilterExpr> {
    value.map(|v| FilterExpr::gte(field, v.into()))
}

/// Less-than comparison when the operand is present
pub fn lt_opt(field: &str, value: Option<impl Into<Value>>) -> Option<FilterExpr> {
    value.map(|v| FilterExpr::lt(field, v.into()))
}

/// Less-or-equal comparison when the operand is present
pub fn lte_opt(field: &str, value: Option<impl Into<Value>>) -> Option<FilterExpr> {
    value.map(|v| FilterExpr::lte(field, v.into()))
}

/// Equality on a text field.
///
/// A missing, empty, or whitespace-only value counts as absent. The operand
/// is compared as given; trimming is only used to detect blankness.
pub fn text_eq(field: &str, value: Option<&str>) -> Option<FilterExpr> {
    match value {
        Some(text) if !text.trim().is_empty() => {
            Some(FilterExpr::eq(field, Value::String(text.to_string())))
        }
        _ => None,
    }
}

/// Inclusive range with independently optional bounds.
///
/// A single present bound degrades to the one-sided comparison; neither
/// bound present contributes nothing.
pub fn between(
    field: &str,
    lower: Option<impl Into<Value>>,
    upper: Option<impl Into<Value>>,
) -> Option<FilterExpr> {
    FilterExpr::all([gte_opt(field, lower), lte_opt(field, upper)])
}
