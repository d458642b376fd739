//! Core navigation logic for the Kwani handout browser.
//! Front-ends (Flutter via FFI, terminal CLI) only render what this crate
//! decides to show.

pub mod config;
pub mod content;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod nav;
pub mod remote;

pub use config::{BackendConfig, ConfigError};
pub use dispatch::{query_for, QueryDispatcher};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::records::{Course, CourseUnit, Handout, Record, RecordId, University};
pub use nav::controller::{NavOutcome, NavigationController};
pub use nav::render::{RecordingRenderer, Renderer};
pub use nav::screen::{ListItem, Screen, APP_TITLE};
pub use nav::session::{NavigationSession, RequestTicket, TransitionKind};
pub use nav::stack::ViewStack;
pub use nav::year::{year_buckets, YearBucket};
pub use nav::{Level, NavResult, NavigationError, NavigationFrame};
pub use remote::http::HttpTableSource;
pub use remote::memory::MemoryTableSource;
pub use remote::{
    Collection, FailureKind, QueryFailure, QueryResult, RecordSeq, TableQuery, TableSource,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
