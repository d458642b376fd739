//! Hierarchy levels and the frames that reproduce them.

use std::fmt::{Display, Formatter};

/// One stage of the navigation hierarchy, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    University,
    Course,
    Year,
    CourseUnit,
    Handout,
    Content,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::University,
        Level::Course,
        Level::Year,
        Level::CourseUnit,
        Level::Handout,
        Level::Content,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::University => "university",
            Self::Course => "course",
            Self::Year => "year",
            Self::CourseUnit => "course_unit",
            Self::Handout => "handout",
            Self::Content => "content",
        }
    }

    /// Level reached by selecting an item at this level.
    pub fn next(self) -> Option<Level> {
        match self {
            Self::University => Some(Self::Course),
            Self::Course => Some(Self::Year),
            Self::Year => Some(Self::CourseUnit),
            Self::CourseUnit => Some(Self::Handout),
            Self::Handout => Some(Self::Content),
            Self::Content => None,
        }
    }

    pub fn previous(self) -> Option<Level> {
        Self::ALL
            .into_iter()
            .find(|level| level.next() == Some(self))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shown level plus the parent id its query is filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavigationFrame {
    Universities,
    Courses { university_id: String },
    Years { course_id: String },
    CourseUnits { course_id: String },
    Handouts { course_unit_id: String },
    Content { handout_id: String },
}

impl NavigationFrame {
    /// Frame for `level` filtered by `parent_id`; `None` for the root level.
    pub fn child(level: Level, parent_id: impl Into<String>) -> Option<Self> {
        let id = parent_id.into();
        match level {
            Level::University => None,
            Level::Course => Some(Self::Courses { university_id: id }),
            Level::Year => Some(Self::Years { course_id: id }),
            Level::CourseUnit => Some(Self::CourseUnits { course_id: id }),
            Level::Handout => Some(Self::Handouts { course_unit_id: id }),
            Level::Content => Some(Self::Content { handout_id: id }),
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Self::Universities => Level::University,
            Self::Courses { .. } => Level::Course,
            Self::Years { .. } => Level::Year,
            Self::CourseUnits { .. } => Level::CourseUnit,
            Self::Handouts { .. } => Level::Handout,
            Self::Content { .. } => Level::Content,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Self::Universities => None,
            Self::Courses { university_id } => Some(university_id.as_str()),
            Self::Years { course_id } | Self::CourseUnits { course_id } => {
                Some(course_id.as_str())
            }
            Self::Handouts { course_unit_id } => Some(course_unit_id.as_str()),
            Self::Content { handout_id } => Some(handout_id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, NavigationFrame};

    #[test]
    fn levels_chain_forward_and_back() {
        assert_eq!(Level::University.previous(), None);
        assert_eq!(Level::Content.next(), None);
        for pair in Level::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
    }

    #[test]
    fn child_frames_keep_level_and_parent() {
        assert!(NavigationFrame::child(Level::University, "u1").is_none());

        let frame = NavigationFrame::child(Level::Year, "c1").expect("year frame");
        assert_eq!(frame, NavigationFrame::Years { course_id: "c1".to_string() });
        assert_eq!(frame.level(), Level::Year);
        assert_eq!(frame.parent_id(), Some("c1"));
        assert_eq!(NavigationFrame::Universities.parent_id(), None);
    }
}
