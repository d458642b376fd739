//! Remote table access contracts and implementations.
//!
//! # Responsibility
//! - Describe one filtered/ordered read against a named collection.
//! - Isolate transport details (HTTP backend, in-memory fixtures) behind
//!   the `TableSource` trait.
//!
//! # Invariants
//! - Only reads exist; no source exposes a mutation.
//! - One `read` call is one round trip and returns the complete result.
//!
//! # See also
//! - `crate::dispatch` for the per-level query builders.

mod error;
pub mod http;
pub mod memory;
mod rows;

pub use error::{FailureKind, QueryFailure, QueryResult};
pub use rows::RecordSeq;

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Named remote collections used by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    University,
    Course,
    CourseUnit,
    Handout,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::University,
        Collection::Course,
        Collection::CourseUnit,
        Collection::Handout,
    ];

    /// Backend table name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::University => "university",
            Self::Course => "course",
            Self::CourseUnit => "courseUnit",
            Self::Handout => "handout",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.as_str() == value.trim())
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One read request: equality filters plus an optional ascending ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub collection: Collection,
    /// Field -> required value. Kept sorted so encoded requests are stable.
    pub filters: BTreeMap<String, String>,
    pub order_by: Option<String>,
}

impl TableQuery {
    /// Unfiltered, unordered read of `collection`.
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filters: BTreeMap::new(),
            order_by: None,
        }
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }
}

/// Read-only access to filterable, orderable remote collections.
pub trait TableSource {
    /// Executes one read and returns the raw JSON rows.
    fn read(&self, query: &TableQuery) -> QueryResult<Vec<Value>>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn read(&self, query: &TableQuery) -> QueryResult<Vec<Value>> {
        (**self).read(query)
    }
}

impl<T: TableSource + ?Sized> TableSource for Arc<T> {
    fn read(&self, query: &TableQuery) -> QueryResult<Vec<Value>> {
        (**self).read(query)
    }
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn read(&self, query: &TableQuery) -> QueryResult<Vec<Value>> {
        (**self).read(query)
    }
}
