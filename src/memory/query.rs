//! Query descriptor for the memory backend
//!
//! Builder-style and declarative; the store applies join, filter, sort,
//! window, and projection in that order.

use crate::filter::FilterExpr;
use crate::page::SortSpec;

/// Left-join directive.
///
/// For each base row, the first row of `collection` whose `foreign_field`
/// equals the base row's `local_field` is embedded under `alias`. No match
/// leaves the alias absent, so a filter on an alias path excludes unjoined
/// rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Collection to join
    pub collection: String,
    /// Field on the base row holding the join key
    pub local_field: String,
    /// Field on the joined row the key must equal
    pub foreign_field: String,
    /// Object key the joined row is embedded under
    pub alias: String,
}

/// One projected output field
#[derive(Debug, Clone, PartialEq)]
pub struct SelectField {
    /// Dotted source path on the joined row
    pub source: String,
    /// Output key
    pub name: String,
}

impl SelectField {
    /// Selects a source path under its own name
    pub fn path(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            name: source.clone(),
            source,
        }
    }

    /// Renames the output key
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Declarative query over one collection
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryQuery {
    pub(crate) collection: String,
    pub(crate) joins: Vec<Join>,
    pub(crate) filter: Option<FilterExpr>,
    pub(crate) sorts: Vec<SortSpec>,
    pub(crate) select: Vec<SelectField>,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
}

impl MemoryQuery {
    /// Creates a query over a collection
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            joins: Vec::new(),
            filter: None,
            sorts: Vec::new(),
            select: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    /// Adds a left join embedding the first match under `alias`
    pub fn left_join(
        mut self,
        collection: impl Into<String>,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.joins.push(Join {
            collection: collection.into(),
            local_field: local_field.into(),
            foreign_field: foreign_field.into(),
            alias: alias.into(),
        });
        self
    }

    /// ANDs a filter expression onto the query
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    /// ANDs a filter when present; no filter matches every row
    pub fn filter_maybe(self, expr: Option<FilterExpr>) -> Self {
        match expr {
            Some(expr) => self.filter(expr),
            None => self,
        }
    }

    /// Appends a sort directive; earlier directives take priority
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Projects result rows down to the selected fields
    pub fn select(mut self, fields: Vec<SelectField>) -> Self {
        self.select = fields;
        self
    }

    /// Skips rows before the page window
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Caps the number of returned rows
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
