//! Filter expression tree
//!
//! Comparisons combined with logical AND, nothing else. An expression is
//! never partially constructed: a comparison whose operand is absent is
//! omitted at composition time, not carried as a vacuous leaf.

use serde_json::Value;

/// Comparison operation with its operand
#[derive(Debug, Clone, PartialEq)]
pub enum CompareOp {
    /// Equality: field = value
    Eq(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Less than: field < value
    Lt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
}

/// A single comparison (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Field path, dotted for nested values (e.g. "group.name")
    pub field: String,
    /// Comparison operation
    pub op: CompareOp,
}

/// Boolean filter expression over row fields.
///
/// "No filter at all" is represented by `Option<FilterExpr>` at the call
/// site, never by an empty conjunction inside the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// A single comparison
    Cmp(Comparison),
    /// Conjunction of sub-expressions
    And(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Creates an equality comparison
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        FilterExpr::Cmp(Comparison {
            field: field.into(),
            op: CompareOp::Eq(value),
        })
    }

    /// Creates a greater-than comparison
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        FilterExpr::Cmp(Comparison {
            field: field.into(),
            op: CompareOp::Gt(value),
        })
    }

    /// Creates a greater-or-equal comparison
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        FilterExpr::Cmp(Comparison {
            field: field.into(),
            op: CompareOp::Gte(value),
        })
    }

    /// Creates a less-than comparison
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        FilterExpr::Cmp(Comparison {
            field: field.into(),
            op: CompareOp::Lt(value),
        })
    }

    /// Creates a less-or-equal comparison
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        FilterExpr::Cmp(Comparison {
            field: field.into(),
            op: CompareOp::Lte(value),
        })
    }

    /// ANDs two expressions, flattening nested conjunctions
    pub fn and(self, other: FilterExpr) -> Self {
        match (self, other) {
            (FilterExpr::And(mut lhs), FilterExpr::And(rhs)) => {
                lhs.extend(rhs);
                FilterExpr::And(lhs)
            }
            (FilterExpr::And(mut lhs), rhs) => {
                lhs.push(rhs);
                FilterExpr::And(lhs)
            }
            (lhs, FilterExpr::And(rhs)) => {
                let mut terms = Vec::with_capacity(rhs.len() + 1);
                terms.push(lhs);
                terms.extend(rhs);
                FilterExpr::And(terms)
            }
            (lhs, rhs) => FilterExpr::And(vec![lhs, rhs]),
        }
    }

    /// ANDs the present expressions, in order.
    ///
    /// Returns `None` when every part is absent; a single present part is
    /// returned unwrapped, not wrapped in a one-element conjunction.
    pub fn all(parts: impl IntoIterator<Item = Option<FilterExpr>>) -> Option<FilterExpr> {
        let mut present: Vec<FilterExpr> = parts.into_iter().flatten().collect();
        match present.len() {
            0 => None,
            1 => Some(present.remove(0)),
            _ => Some(FilterExpr::And(present)),
        }
    }
}
