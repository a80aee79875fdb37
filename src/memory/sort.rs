//! Deterministic multi-key sorting
//!
//! Stable sort; keys are compared in priority order and the first non-equal
//! key decides. A missing value sorts before any present value; mixed types
//! order by type class (null < bool < number < string < array < object).

use std::cmp::Ordering;

use serde_json::Value;

use crate::page::{SortDirection, SortSpec};

use super::eval::resolve_path;

/// Sorts rows in place by the given directives
pub(crate) fn sort_rows(rows: &mut [Value], sorts: &[SortSpec]) {
    if sorts.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for spec in sorts {
            let ordering = compare_keys(
                resolve_path(a, &spec.field),
                resolve_path(b, &spec.field),
            );
            let ordering = match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_keys(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => compare_present(a_val, b_val),
    }
}

fn type_order(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    let a_type = type_order(a);
    let b_type = type_order(b);
    if a_type != b_type {
        return a_type.cmp(&b_type);
    }

    match (a, b) {
        (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
        (Value::Number(a_n), Value::Number(b_n)) => {
            let a_f = a_n.as_f64().unwrap_or(0.0);
            let b_f = b_n.as_f64().unwrap_or(0.0);
            a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
        }
        (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
        _ => Ordering::Equal, // nulls equal; arrays and objects not compared
    }
}
