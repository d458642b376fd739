//! Per-level query construction and dispatch.
//!
//! # Responsibility
//! - Map each navigation frame to exactly one filtered/ordered table read.
//! - Return typed, lazily decoded record sequences.
//!
//! # Invariants
//! - Same frame, same query: back navigation re-issues the forward read.
//! - Only the year level orders its rows (by `year`, ascending).

use crate::model::records::{Course, CourseUnit, Handout, University};
use crate::nav::NavigationFrame;
use crate::remote::{Collection, QueryResult, RecordSeq, TableQuery, TableSource};
use serde::de::DeserializeOwned;

const YEAR_FIELD: &str = "year";

/// Builds the read that populates `frame`.
pub fn query_for(frame: &NavigationFrame) -> TableQuery {
    match frame {
        NavigationFrame::Universities => TableQuery::new(Collection::University),
        NavigationFrame::Courses { university_id } => {
            TableQuery::new(Collection::Course).filter_eq("university", university_id.as_str())
        }
        NavigationFrame::Years { course_id } => TableQuery::new(Collection::CourseUnit)
            .filter_eq("course", course_id.as_str())
            .order_by(YEAR_FIELD),
        NavigationFrame::CourseUnits { course_id } => {
            TableQuery::new(Collection::CourseUnit).filter_eq("course", course_id.as_str())
        }
        NavigationFrame::Handouts { course_unit_id } => {
            TableQuery::new(Collection::Handout).filter_eq("courseUnit", course_unit_id.as_str())
        }
        NavigationFrame::Content { handout_id } => {
            TableQuery::new(Collection::Handout).filter_eq("id", handout_id.as_str())
        }
    }
}

/// Issues level queries against one table source.
pub struct QueryDispatcher<S: TableSource> {
    source: S,
}

impl<S: TableSource> QueryDispatcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn universities(&self) -> QueryResult<RecordSeq<University>> {
        self.fetch(&NavigationFrame::Universities)
    }

    /// Courses whose `university` equals `university_id`.
    pub fn courses(&self, university_id: &str) -> QueryResult<RecordSeq<Course>> {
        self.fetch(&NavigationFrame::Courses {
            university_id: university_id.to_string(),
        })
    }

    /// Course units of a course ordered by year, for year bucketing.
    pub fn course_units_by_year(&self, course_id: &str) -> QueryResult<RecordSeq<CourseUnit>> {
        self.fetch(&NavigationFrame::Years {
            course_id: course_id.to_string(),
        })
    }

    /// All course units of a course, in backend order.
    pub fn course_units(&self, course_id: &str) -> QueryResult<RecordSeq<CourseUnit>> {
        self.fetch(&NavigationFrame::CourseUnits {
            course_id: course_id.to_string(),
        })
    }

    pub fn handouts(&self, course_unit_id: &str) -> QueryResult<RecordSeq<Handout>> {
        self.fetch(&NavigationFrame::Handouts {
            course_unit_id: course_unit_id.to_string(),
        })
    }

    /// The handout with `id == handout_id` (zero or one row).
    pub fn handout(&self, handout_id: &str) -> QueryResult<RecordSeq<Handout>> {
        self.fetch(&NavigationFrame::Content {
            handout_id: handout_id.to_string(),
        })
    }

    /// Reads the rows for `frame` and decodes them as `T` on iteration.
    pub fn fetch<T: DeserializeOwned>(&self, frame: &NavigationFrame) -> QueryResult<RecordSeq<T>> {
        let query = query_for(frame);
        let rows = self.source.read(&query)?;
        Ok(RecordSeq::new(query.collection, rows))
    }
}
