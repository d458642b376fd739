//! In-memory table source backed by fixture rows.
//!
//! # Responsibility
//! - Serve the same read contract as the HTTP backend from local rows.
//! - Load fixture documents of the shape `{ "university": [...], ... }`.
//!
//! # Invariants
//! - Equality filters compare the field's string form; missing or null
//!   fields never match.
//! - Ordering is a stable ascending sort: numbers numerically, strings
//!   lexically, missing values last.

use super::{Collection, QueryFailure, QueryResult, TableQuery, TableSource};
use log::debug;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

/// Read-only fixture tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSource {
    tables: BTreeMap<Collection, Vec<Value>>,
}

impl MemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all rows of one collection.
    pub fn with_rows(mut self, collection: Collection, rows: Vec<Value>) -> Self {
        self.tables.insert(collection, rows);
        self
    }

    /// Parses a fixture document.
    ///
    /// # Errors
    /// - Returns a `Malformed` failure when the document is not an object of
    ///   known collection names mapped to arrays.
    pub fn from_json_str(text: &str) -> QueryResult<Self> {
        let document: Map<String, Value> = serde_json::from_str(text)?;
        let mut source = Self::new();
        for (name, rows) in document {
            let collection = Collection::parse(&name).ok_or_else(|| {
                QueryFailure::malformed(format!("unknown collection `{name}` in fixture"))
            })?;
            let Value::Array(rows) = rows else {
                return Err(QueryFailure::malformed(format!(
                    "fixture collection `{name}` must be an array"
                )));
            };
            source.tables.insert(collection, rows);
        }
        Ok(source)
    }

    /// Reads and parses a fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            QueryFailure::transport(format!(
                "failed to read fixture `{}`: {err}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text)
    }

    pub fn row_count(&self, collection: Collection) -> usize {
        self.tables.get(&collection).map_or(0, Vec::len)
    }
}

impl TableSource for MemoryTableSource {
    fn read(&self, query: &TableQuery) -> QueryResult<Vec<Value>> {
        let mut rows = self
            .tables
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filters(row, query))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if let Some(field) = query.order_by.as_deref() {
            rows.sort_by(|left, right| compare_field(left.get(field), right.get(field)));
        }

        debug!(
            "event=query module=remote status=ok source=memory collection={} rows={}",
            query.collection,
            rows.len()
        );
        Ok(rows)
    }
}

fn matches_filters(row: &Value, query: &TableQuery) -> bool {
    query
        .filters
        .iter()
        .all(|(field, expected)| field_text(row.get(field)).as_deref() == Some(expected.as_str()))
}

fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn compare_field(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(a), Some(b)) => field_text(Some(a)).cmp(&field_text(Some(b))),
    }
}
