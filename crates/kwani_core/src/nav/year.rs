//! Distinct-year buckets for a course's unit list.

use crate::model::records::CourseUnit;
use std::collections::HashSet;

/// One selectable "Year N" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBucket {
    pub year: u32,
    /// Course the bucket belongs to; selecting it lists that course's units.
    pub course_id: String,
}

impl YearBucket {
    pub fn label(&self) -> String {
        format!("Year {}", self.year)
    }
}

/// Keeps the first unit of each year, in input order.
///
/// Input is expected to be ordered by year, which makes first-occurrence
/// deduplication equal to set deduplication in ascending order.
pub fn year_buckets<'a>(units: impl IntoIterator<Item = &'a CourseUnit>) -> Vec<YearBucket> {
    let mut seen = HashSet::new();
    units
        .into_iter()
        .filter(|unit| seen.insert(unit.year))
        .map(|unit| YearBucket {
            year: unit.year,
            course_id: unit.course.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::year_buckets;
    use crate::model::records::CourseUnit;

    fn unit(id: &str, year: u32) -> CourseUnit {
        CourseUnit {
            id: id.to_string(),
            code: String::new(),
            name: String::new(),
            course: "c1".to_string(),
            year,
        }
    }

    #[test]
    fn repeated_years_collapse_to_one_bucket() {
        let units = vec![unit("cu1", 1), unit("cu2", 1), unit("cu3", 2)];
        let labels = year_buckets(&units)
            .iter()
            .map(|bucket| bucket.label())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Year 1", "Year 2"]);
    }

    #[test]
    fn buckets_point_at_the_course() {
        let units = vec![unit("cu1", 3)];
        let buckets = year_buckets(&units);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].course_id, "c1");
        assert_eq!(buckets[0].year, 3);
    }

    #[test]
    fn each_call_starts_from_an_empty_set() {
        let units = vec![unit("cu1", 1)];
        assert_eq!(year_buckets(&units).len(), 1);
        assert_eq!(year_buckets(&units).len(), 1);
        assert!(year_buckets(&Vec::<CourseUnit>::new()).is_empty());
    }
}
