use super::{Collection, QueryFailure, QueryResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Lazy, single-shot sequence of typed records from one read.
///
/// Rows are decoded on demand; a row that does not match `T` yields a
/// `Malformed` failure at its position. The sequence is consumed by
/// iteration and cannot be restarted.
pub struct RecordSeq<T> {
    collection: Collection,
    rows: std::vec::IntoIter<Value>,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> RecordSeq<T> {
    pub fn new(collection: Collection, rows: Vec<Value>) -> Self {
        Self {
            collection,
            rows: rows.into_iter(),
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Drains the sequence, stopping at the first malformed row.
    pub fn into_vec(self) -> QueryResult<Vec<T>> {
        self.collect()
    }
}

impl<T: DeserializeOwned> Iterator for RecordSeq<T> {
    type Item = QueryResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let collection = self.collection;
        Some(serde_json::from_value(row).map_err(|err| {
            QueryFailure::malformed(format!("invalid `{collection}` row: {err}"))
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::RecordSeq;
    use crate::model::records::Course;
    use crate::remote::{Collection, FailureKind};
    use serde_json::json;

    #[test]
    fn decodes_rows_lazily_and_reports_bad_row_in_place() {
        let rows = vec![
            json!({ "id": "c1", "name": "CS", "university": "u1" }),
            json!({ "id": "c2", "name": "Broken" }),
        ];
        let mut seq = RecordSeq::<Course>::new(Collection::Course, rows);
        assert_eq!(seq.size_hint(), (2, Some(2)));

        let first = seq.next().expect("first row").expect("first row decodes");
        assert_eq!(first.id, "c1");

        let second = seq.next().expect("second row");
        let failure = second.expect_err("missing university must fail");
        assert_eq!(failure.kind, FailureKind::Malformed);
        assert!(failure.message.contains("course"));
        assert!(seq.next().is_none());
    }

    #[test]
    fn into_vec_on_empty_rows_is_empty() {
        let seq = RecordSeq::<Course>::new(Collection::Course, Vec::new());
        assert!(seq.into_vec().expect("empty read is ok").is_empty());
    }
}
