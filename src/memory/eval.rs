//! Strict predicate evaluation
//!
//! No type coercion, exact match only. Missing fields and nulls never
//! match any comparison.

use std::cmp::Ordering;

use serde_json::Value;

use crate::filter::{CompareOp, Comparison, FilterExpr};

/// Resolves a dotted path against a row, one object level per segment
pub(crate) fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Checks whether a row matches a filter expression
pub(crate) fn matches(expr: &FilterExpr, row: &Value) -> bool {
    match expr {
        FilterExpr::Cmp(cmp) => matches_comparison(cmp, row),
        FilterExpr::And(terms) => terms.iter().all(|term| matches(term, row)),
    }
}

fn matches_comparison(cmp: &Comparison, row: &Value) -> bool {
    let actual = match resolve_path(row, &cmp.field) {
        Some(value) => value,
        None => return false, // missing field never matches
    };
    if actual.is_null() {
        return false;
    }

    match &cmp.op {
        CompareOp::Eq(expected) => actual == expected,
        CompareOp::Gt(bound) => matches!(compare(actual, bound), Some(Ordering::Greater)),
        CompareOp::Gte(bound) => matches!(
            compare(actual, bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        CompareOp::Lt(bound) => matches!(compare(actual, bound), Some(Ordering::Less)),
        CompareOp::Lte(bound) => matches!(
            compare(actual, bound),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

/// Orders number/number and string/string pairs; anything else does not
/// order and the comparison fails
fn compare(actual: &Value, bound: &Value) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                return af.partial_cmp(&bf);
            }
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return Some(ai.cmp(&bi));
            }
            None
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
