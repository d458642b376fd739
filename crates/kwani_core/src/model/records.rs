//! University / course / course-unit / handout records.
//!
//! # Responsibility
//! - Decode backend JSON rows (camelCase field names) into typed records.
//! - Derive list labels the way the mobile UI presents them.
//!
//! # Invariants
//! - Unknown backend columns (`createdAt`, `deleted`, ...) are ignored.
//! - `Handout::content` reads the `iframe` backend column, falling back to
//!   `content`; when a row carries both, `iframe` wins.

use serde::Deserialize;

/// Backend-assigned record identifier.
pub type RecordId = String;

/// Common surface shared by every listable record.
pub trait Record {
    /// Stable backend id used as the selection key.
    fn id(&self) -> &str;
    /// Text shown for this record in a list view.
    fn label(&self) -> String;
}

/// Top-level university row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Course offered by one university.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    /// Foreign key to `University::id`.
    pub university: RecordId,
}

/// Course unit (module) taught in a given year of a course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUnit {
    pub id: RecordId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Foreign key to `Course::id`.
    pub course: RecordId,
    pub year: u32,
}

/// Handout attached to a course unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "HandoutRow")]
pub struct Handout {
    pub id: RecordId,
    pub name: String,
    /// Foreign key to `CourseUnit::id`.
    pub course_unit: RecordId,
    /// Embedded document markup, usually a single `<iframe>`.
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandoutRow {
    id: RecordId,
    #[serde(default)]
    name: String,
    course_unit: RecordId,
    #[serde(default)]
    iframe: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl From<HandoutRow> for Handout {
    fn from(row: HandoutRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            course_unit: row.course_unit,
            content: row.iframe.or(row.content).unwrap_or_default(),
        }
    }
}

impl Record for University {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        if self.short_name.trim().is_empty() {
            self.name.clone()
        } else {
            self.short_name.clone()
        }
    }
}

impl Record for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Record for CourseUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("({}){}", self.code, self.name)
    }
}

impl Record for Handout {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{CourseUnit, Handout, Record, University};
    use serde_json::json;

    #[test]
    fn university_label_prefers_short_name() {
        let university: University = serde_json::from_value(json!({
            "id": "u1",
            "name": "University of Nairobi",
            "shortName": "UoN",
            "version": "AAAAAAAAB9E=",
            "createdAt": "2017-03-01T10:00:00Z"
        }))
        .expect("university row should decode");
        assert_eq!(university.label(), "UoN");
        assert_eq!(university.version.as_deref(), Some("AAAAAAAAB9E="));
    }

    #[test]
    fn university_label_falls_back_to_name() {
        let university: University =
            serde_json::from_value(json!({ "id": "u1", "name": "UniA" })).expect("decode");
        assert_eq!(university.label(), "UniA");
    }

    #[test]
    fn course_unit_label_joins_code_and_name() {
        let unit: CourseUnit = serde_json::from_value(json!({
            "id": "cu1",
            "code": "CSC111",
            "name": "Intro to Programming",
            "course": "c1",
            "year": 1
        }))
        .expect("course unit row should decode");
        assert_eq!(unit.label(), "(CSC111)Intro to Programming");
    }

    #[test]
    fn handout_reads_backend_iframe_column() {
        let handout: Handout = serde_json::from_value(json!({
            "id": "h1",
            "name": "Week 1",
            "courseUnit": "cu1",
            "iframe": "<iframe src=doc.pdf>"
        }))
        .expect("handout row should decode");
        assert_eq!(handout.content, "<iframe src=doc.pdf>");
        assert_eq!(handout.course_unit, "cu1");
    }

    #[test]
    fn handout_with_both_markup_columns_prefers_iframe() {
        let handout: Handout = serde_json::from_value(json!({
            "id": "h1",
            "courseUnit": "cu1",
            "iframe": "<iframe src=doc.pdf>",
            "content": "<p>legacy</p>"
        }))
        .expect("row with iframe and content should decode");
        assert_eq!(handout.content, "<iframe src=doc.pdf>");

        let legacy: Handout = serde_json::from_value(json!({
            "id": "h2",
            "courseUnit": "cu1",
            "content": "<p>legacy</p>"
        }))
        .expect("content-only row should decode");
        assert_eq!(legacy.content, "<p>legacy</p>");
        assert_eq!(legacy.name, "");
    }

    #[test]
    fn course_unit_without_year_is_rejected() {
        let result = serde_json::from_value::<CourseUnit>(json!({
            "id": "cu1",
            "course": "c1"
        }));
        assert!(result.is_err());
    }
}
