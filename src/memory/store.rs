//! In-memory collection store
//!
//! Reference backend for the executor and unit-of-work seams. Queries run a
//! fixed pipeline in strict order: join, filter, sort, offset, limit,
//! project. Counting shares the join/filter stage and ignores the rest.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::filter::FilterExpr;
use crate::page::PageRequest;
use crate::pager::{QueryExecutor, UnitOfWork};

use super::errors::{MemoryError, MemoryResult};
use super::eval::{matches, resolve_path};
use super::query::{Join, MemoryQuery, SelectField};
use super::sort::sort_rows;

/// Named collections of JSON rows, insertion order preserved
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
        }
    }

    /// Appends a row, creating the collection on first use
    pub fn insert(&mut self, collection: &str, row: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(row);
    }

    /// Rows of a collection in insertion order
    pub fn rows(&self, collection: &str) -> MemoryResult<&[Value]> {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .ok_or_else(|| MemoryError::UnknownCollection(collection.to_string()))
    }

    /// Sets a top-level field on every row matching the filter.
    ///
    /// `None` matches every row. Returns the number of rows changed.
    pub fn update_where(
        &mut self,
        collection: &str,
        field: &str,
        value: Value,
        filter: Option<&FilterExpr>,
    ) -> MemoryResult<u64> {
        let rows = self.rows_mut(collection)?;
        let mut affected = 0;
        for row in rows.iter_mut() {
            let matched = match filter {
                Some(expr) => matches(expr, row),
                None => true,
            };
            if !matched {
                continue;
            }
            if let Value::Object(map) = row {
                map.insert(field.to_string(), value.clone());
                affected += 1;
            }
        }
        Ok(affected)
    }

    /// Recomputes a top-level field from its current value on every row
    /// matching the filter.
    ///
    /// The closure receives the current value, null when the field is
    /// absent. `None` matches every row. Returns the number of rows
    /// changed.
    pub fn map_where<F>(
        &mut self,
        collection: &str,
        field: &str,
        filter: Option<&FilterExpr>,
        f: F,
    ) -> MemoryResult<u64>
    where
        F: Fn(&Value) -> Value,
    {
        let rows = self.rows_mut(collection)?;
        let mut affected = 0;
        for row in rows.iter_mut() {
            let matched = match filter {
                Some(expr) => matches(expr, row),
                None => true,
            };
            if !matched {
                continue;
            }
            if let Value::Object(map) = row {
                let current = map.get(field).cloned().unwrap_or(Value::Null);
                map.insert(field.to_string(), f(&current));
                affected += 1;
            }
        }
        Ok(affected)
    }

    /// Removes every row matching the filter.
    ///
    /// `None` matches every row. Returns the number of rows removed.
    pub fn delete_where(
        &mut self,
        collection: &str,
        filter: Option<&FilterExpr>,
    ) -> MemoryResult<u64> {
        let rows = self.rows_mut(collection)?;
        let before = rows.len();
        rows.retain(|row| match filter {
            Some(expr) => !matches(expr, row),
            None => false,
        });
        Ok((before - rows.len()) as u64)
    }

    fn rows_mut(&mut self, collection: &str) -> MemoryResult<&mut Vec<Value>> {
        self.collections
            .get_mut(collection)
            .ok_or_else(|| MemoryError::UnknownCollection(collection.to_string()))
    }

    /// Join + filter, the stage shared by execute and count
    fn matching_rows(&self, query: &MemoryQuery) -> MemoryResult<Vec<Value>> {
        let base = self.rows(&query.collection)?;

        // Resolve join targets before scanning so an unknown collection
        // fails the whole query, not just the rows reached so far.
        let mut join_sources = Vec::with_capacity(query.joins.len());
        for join in &query.joins {
            join_sources.push(self.rows(&join.collection)?);
        }

        let mut out = Vec::new();
        for row in base {
            let mut row = row.clone();
            for (join, source) in query.joins.iter().zip(&join_sources) {
                if let Some(embedded) = join_match(&row, join, source) {
                    if let Value::Object(map) = &mut row {
                        map.insert(join.alias.clone(), embedded);
                    }
                }
            }
            let matched = match &query.filter {
                Some(expr) => matches(expr, &row),
                None => true,
            };
            if matched {
                out.push(row);
            }
        }
        Ok(out)
    }

    /// Full pipeline: join, filter, sort, window, project
    fn run_query(&self, query: &MemoryQuery) -> MemoryResult<Vec<Value>> {
        let mut rows = self.matching_rows(query)?;
        sort_rows(&mut rows, &query.sorts);

        let offset = query.offset.unwrap_or(0) as usize;
        let mut rows: Vec<Value> = rows.into_iter().skip(offset).collect();
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }

        if !query.select.is_empty() {
            rows = rows.iter().map(|row| project(row, &query.select)).collect();
        }
        Ok(rows)
    }
}

/// First row of `source` whose foreign field equals the base row's join key
fn join_match(row: &Value, join: &Join, source: &[Value]) -> Option<Value> {
    let key = resolve_path(row, &join.local_field)?;
    if key.is_null() {
        return None;
    }
    source
        .iter()
        .find(|candidate| resolve_path(candidate, &join.foreign_field) == Some(key))
        .cloned()
}

/// Projects a row down to the selected fields; a missing source becomes null
fn project(row: &Value, fields: &[SelectField]) -> Value {
    let mut out = Map::new();
    for field in fields {
        let value = resolve_path(row, &field.source)
            .cloned()
            .unwrap_or(Value::Null);
        out.insert(field.name.clone(), value);
    }
    Value::Object(out)
}

impl QueryExecutor for MemoryStore {
    type Query = MemoryQuery;
    type Row = Value;
    type Error = MemoryError;

    fn apply_pagination(&self, query: MemoryQuery, page: &PageRequest) -> MemoryQuery {
        let mut query = query.offset(page.offset()).limit(page.size());
        for sort in page.sorts() {
            query = query.sort(sort.clone());
        }
        query
    }

    fn execute(&self, query: MemoryQuery) -> MemoryResult<Vec<Value>> {
        self.run_query(&query)
    }

    fn count(&self, query: MemoryQuery) -> MemoryResult<u64> {
        Ok(self.matching_rows(&query)?.len() as u64)
    }
}

impl UnitOfWork for MemoryStore {
    type Executor = MemoryStore;
    type Error = MemoryError;

    fn run<T, F>(&self, work: F) -> MemoryResult<T>
    where
        F: FnOnce(&MemoryStore) -> MemoryResult<T>,
    {
        work(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SortSpec;
    use serde_json::json;

    fn store_with_rows() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("groups", json!({"id": 1, "name": "A"}));
        store.insert("groups", json!({"id": 2, "name": "B"}));
        store.insert("rows", json!({"id": 1, "name": "row1", "age": 10, "group_id": 1}));
        store.insert("rows", json!({"id": 2, "name": "row2", "age": 20, "group_id": 1}));
        store.insert("rows", json!({"id": 3, "name": "row3", "age": 30, "group_id": 2}));
        store.insert("rows", json!({"id": 4, "name": "row4", "age": 40, "group_id": 2}));
        store
    }

    fn names(rows: &[Value]) -> Vec<&str> {
        rows.iter()
            .map(|row| row.get("name").and_then(Value::as_str).unwrap())
            .collect()
    }

    #[test]
    fn test_insert_and_rows() {
        let store = store_with_rows();
        assert_eq!(store.rows("rows").unwrap().len(), 4);
        assert_eq!(store.rows("groups").unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_collection() {
        let store = MemoryStore::new();
        assert_eq!(
            store.rows("missing"),
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
        assert_eq!(
            store.execute(MemoryQuery::new("missing")),
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
    }

    #[test]
    fn test_unknown_join_collection_fails_query() {
        let store = store_with_rows();
        let query = MemoryQuery::new("rows").left_join("missing", "group_id", "id", "group");

        assert_eq!(
            store.execute(query),
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
    }

    #[test]
    fn test_execute_filter_sort_window() {
        let store = store_with_rows();
        let query = MemoryQuery::new("rows")
            .filter(FilterExpr::gte("age", json!(20)))
            .sort(SortSpec::desc("age"))
            .offset(1)
            .limit(1);

        let rows = store.execute(query).unwrap();

        assert_eq!(names(&rows), vec!["row3"]);
    }

    #[test]
    fn test_filterless_query_scans_everything() {
        let store = store_with_rows();
        let rows = store.execute(MemoryQuery::new("rows")).unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_count_ignores_sort_and_window() {
        let store = store_with_rows();
        let query = MemoryQuery::new("rows")
            .filter(FilterExpr::gte("age", json!(20)))
            .sort(SortSpec::asc("age"))
            .offset(10)
            .limit(1);

        assert_eq!(store.count(query).unwrap(), 3);
    }

    #[test]
    fn test_left_join_embeds_match() {
        let store = store_with_rows();
        let query = MemoryQuery::new("rows")
            .left_join("groups", "group_id", "id", "group")
            .filter(FilterExpr::eq("group.name", json!("B")))
            .sort(SortSpec::asc("age"));

        let rows = store.execute(query).unwrap();

        assert_eq!(names(&rows), vec!["row3", "row4"]);
        assert_eq!(rows[0]["group"]["name"], "B");
    }

    #[test]
    fn test_left_join_without_partner_keeps_row() {
        let mut store = store_with_rows();
        store.insert("rows", json!({"id": 5, "name": "row5", "age": 50, "group_id": 9}));

        let joined = store
            .execute(MemoryQuery::new("rows").left_join("groups", "group_id", "id", "group"))
            .unwrap();
        assert_eq!(joined.len(), 5);
        assert!(joined[4].get("group").is_none());

        // An alias filter then excludes the unjoined row.
        let filtered = store
            .execute(
                MemoryQuery::new("rows")
                    .left_join("groups", "group_id", "id", "group")
                    .filter(FilterExpr::eq("group.name", json!("B"))),
            )
            .unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_projection_selects_and_renames() {
        let store = store_with_rows();
        let query = MemoryQuery::new("rows")
            .left_join("groups", "group_id", "id", "group")
            .filter(FilterExpr::eq("name", json!("row4")))
            .select(vec![
                SelectField::path("name"),
                SelectField::path("age"),
                SelectField::path("group.name").alias("group_name"),
            ]);

        let rows = store.execute(query).unwrap();

        assert_eq!(
            rows,
            vec![json!({"name": "row4", "age": 40, "group_name": "B"})]
        );
    }

    #[test]
    fn test_projection_missing_source_is_null() {
        let store = store_with_rows();
        let query = MemoryQuery::new("rows")
            .filter(FilterExpr::eq("name", json!("row1")))
            .select(vec![SelectField::path("nickname")]);

        let rows = store.execute(query).unwrap();

        assert_eq!(rows, vec![json!({"nickname": null})]);
    }

    #[test]
    fn test_apply_pagination_fills_window_and_sorts() {
        let store = store_with_rows();
        let page = PageRequest::new(0, 3).unwrap().with_sort(SortSpec::asc("age"));

        let query = store.apply_pagination(MemoryQuery::new("rows"), &page);

        assert_eq!(query.offset, Some(0));
        assert_eq!(query.limit, Some(3));
        assert_eq!(query.sorts, vec![SortSpec::asc("age")]);
    }

    #[test]
    fn test_update_where_returns_affected() {
        let mut store = store_with_rows();

        let affected = store
            .update_where(
                "rows",
                "name",
                json!("minor"),
                Some(&FilterExpr::lt("age", json!(28))),
            )
            .unwrap();

        assert_eq!(affected, 2);
        let renamed = store
            .execute(MemoryQuery::new("rows").filter(FilterExpr::eq("name", json!("minor"))))
            .unwrap();
        assert_eq!(renamed.len(), 2);
    }

    #[test]
    fn test_update_where_without_filter_touches_all() {
        let mut store = store_with_rows();

        let affected = store
            .update_where("rows", "flagged", json!(true), None)
            .unwrap();

        assert_eq!(affected, 4);
    }

    #[test]
    fn test_map_where_recomputes_from_current_value() {
        let mut store = store_with_rows();

        let affected = store
            .map_where(
                "rows",
                "age",
                Some(&FilterExpr::lt("age", json!(28))),
                |age| json!(age.as_i64().unwrap_or(0) + 1),
            )
            .unwrap();

        assert_eq!(affected, 2);
        let bumped = store
            .execute(
                MemoryQuery::new("rows")
                    .filter(FilterExpr::lt("age", json!(28)))
                    .sort(SortSpec::asc("age")),
            )
            .unwrap();
        let ages: Vec<i64> = bumped
            .iter()
            .map(|row| row.get("age").and_then(Value::as_i64).unwrap())
            .collect();
        assert_eq!(ages, vec![11, 21]);
    }

    #[test]
    fn test_map_where_absent_field_is_null() {
        let mut store = store_with_rows();

        let affected = store
            .map_where("rows", "nickname", None, |current| {
                json!(current.is_null())
            })
            .unwrap();

        assert_eq!(affected, 4);
        let rows = store
            .execute(MemoryQuery::new("rows").filter(FilterExpr::eq("nickname", json!(true))))
            .unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_delete_where_returns_removed() {
        let mut store = store_with_rows();

        let removed = store
            .delete_where("rows", Some(&FilterExpr::gt("age", json!(18))))
            .unwrap();

        assert_eq!(removed, 3);
        assert_eq!(store.rows("rows").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_where_without_filter_empties_collection() {
        let mut store = store_with_rows();

        let removed = store.delete_where("rows", None).unwrap();

        assert_eq!(removed, 4);
        assert!(store.rows("rows").unwrap().is_empty());
    }

    #[test]
    fn test_bulk_ops_on_unknown_collection() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.update_where("missing", "x", json!(1), None),
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
        assert_eq!(
            store.map_where("missing", "x", None, |v| v.clone()),
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
        assert_eq!(
            store.delete_where("missing", None),
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
    }

    #[test]
    fn test_unit_of_work_hands_out_executor() {
        let store = store_with_rows();

        let count = store
            .run(|executor| executor.count(MemoryQuery::new("rows")))
            .unwrap();

        assert_eq!(count, 4);
    }

    #[test]
    fn test_unit_of_work_propagates_failure() {
        let store = MemoryStore::new();

        let result = store.run(|executor| executor.count(MemoryQuery::new("missing")));

        assert_eq!(
            result,
            Err(MemoryError::UnknownCollection("missing".to_string()))
        );
    }
}
