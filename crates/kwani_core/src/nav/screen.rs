//! Renderable view model for one navigation level.

use super::frame::{Level, NavigationFrame};
use super::session::RequestTicket;
use super::year::year_buckets;
use crate::content::document_source;
use crate::dispatch::QueryDispatcher;
use crate::model::records::{Course, CourseUnit, Handout, Record, University};
use crate::remote::{QueryResult, RecordSeq, TableSource};
use serde::de::DeserializeOwned;

/// Navbar title shown on every level.
pub const APP_TITLE: &str = "Kwani";

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Id passed back on selection.
    pub id: String,
    pub label: String,
}

/// Everything a renderer needs to draw one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub level: Level,
    pub parent_id: Option<String>,
    /// Empty for the content level and for empty results.
    pub items: Vec<ListItem>,
    /// Handout markup; only set on the content level.
    pub content: Option<String>,
    /// First embedded document URL found in `content`.
    pub document_url: Option<String>,
    pub can_go_back: bool,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        APP_TITLE
    }

    /// List views with no rows are hidden rather than shown empty.
    pub fn is_list_visible(&self) -> bool {
        !self.items.is_empty()
    }

    /// Fetches and shapes the level a ticket targets.
    pub fn load<S: TableSource>(
        dispatcher: &QueryDispatcher<S>,
        ticket: &RequestTicket,
    ) -> QueryResult<Self> {
        load_frame(dispatcher, ticket.target(), ticket.can_go_back())
    }
}

/// Fetches and shapes the screen for `frame`.
pub fn load_frame<S: TableSource>(
    dispatcher: &QueryDispatcher<S>,
    frame: &NavigationFrame,
    can_go_back: bool,
) -> QueryResult<Screen> {
    let mut screen = Screen {
        level: frame.level(),
        parent_id: frame.parent_id().map(str::to_string),
        items: Vec::new(),
        content: None,
        document_url: None,
        can_go_back,
    };

    match frame {
        NavigationFrame::Universities => {
            screen.items = list_items(dispatcher.fetch::<University>(frame)?)?;
        }
        NavigationFrame::Courses { .. } => {
            screen.items = list_items(dispatcher.fetch::<Course>(frame)?)?;
        }
        NavigationFrame::Years { .. } => {
            let units = dispatcher.fetch::<CourseUnit>(frame)?.into_vec()?;
            screen.items = year_buckets(&units)
                .into_iter()
                .map(|bucket| ListItem {
                    label: bucket.label(),
                    id: bucket.course_id,
                })
                .collect();
        }
        NavigationFrame::CourseUnits { .. } => {
            screen.items = list_items(dispatcher.fetch::<CourseUnit>(frame)?)?;
        }
        NavigationFrame::Handouts { .. } => {
            screen.items = list_items(dispatcher.fetch::<Handout>(frame)?)?;
        }
        NavigationFrame::Content { .. } => {
            let markup = dispatcher
                .fetch::<Handout>(frame)?
                .map(|handout| handout.map(|handout| handout.content))
                .collect::<QueryResult<Vec<_>>>()?
                .concat();
            screen.document_url = document_source(&markup);
            screen.content = Some(markup);
        }
    }

    Ok(screen)
}

fn list_items<T: Record + DeserializeOwned>(records: RecordSeq<T>) -> QueryResult<Vec<ListItem>> {
    records
        .map(|record| {
            record.map(|record| ListItem {
                id: record.id().to_string(),
                label: record.label(),
            })
        })
        .collect()
}
