//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose navigation interactions (show root, select, back) to Dart via FRB.
//! - Own the process-wide navigation session shared by all UI calls.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Remote reads run outside the session lock; only the latest request
//!   commits, older responses come back with `stale = true`.
//! - The backend is fixed after the first navigation call.

use kwani_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, BackendConfig,
    HttpTableSource, MemoryTableSource, NavResult, NavigationSession, QueryDispatcher,
    QueryFailure, RequestTicket, Screen, TableSource, APP_TITLE,
};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard};

const FIXTURE_PATH_ENV: &str = "KWANI_FIXTURE_PATH";
const SUPERSEDED_MESSAGE: &str = "superseded by a newer request";

type SharedSource = Arc<dyn TableSource + Send + Sync>;

static NAVIGATOR: OnceCell<Navigator> = OnceCell::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; conflicts return an error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Selects the backend before the first navigation call.
///
/// Input semantics:
/// - `fixture_path`: when set, serve from a local JSON fixture file.
/// - `base_url`: otherwise, HTTP backend URL (blank -> environment/default).
///
/// # FFI contract
/// - Sync call; reads the fixture file when one is given.
/// - Returns empty string on success and error message on failure,
///   including when a backend is already active.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_backend(base_url: Option<String>, fixture_path: Option<String>) -> String {
    let source = match (non_blank(fixture_path), non_blank(base_url)) {
        (Some(path), _) => fixture_source(&path),
        (None, Some(url)) => BackendConfig::from_env()
            .and_then(|config| config.with_base_url(&url))
            .map_err(|err| err.to_string())
            .and_then(|config| http_source(&config)),
        (None, None) => default_source(),
    };
    let navigator = match source {
        Ok(source) => Navigator::new(source),
        Err(err) => return err,
    };
    match NAVIGATOR.set(navigator) {
        Ok(()) => String::new(),
        Err(_) => "backend already configured; restart to switch".to_string(),
    }
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavListItem {
    /// Id to pass back to `nav_select`.
    pub id: String,
    pub label: String,
}

/// Screen envelope for every navigation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavScreenResponse {
    /// Whether a new screen should be drawn.
    pub ok: bool,
    /// Response belonged to a superseded request; keep the current screen.
    pub stale: bool,
    /// Level (`university|course|year|course_unit|handout|content`).
    pub level: Option<String>,
    pub title: String,
    pub items: Vec<NavListItem>,
    /// Handout markup on the content level.
    pub content: Option<String>,
    pub document_url: Option<String>,
    pub can_go_back: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl NavScreenResponse {
    fn rendered(screen: Screen) -> Self {
        let message = if screen.items.is_empty() && screen.content.is_none() {
            "No results.".to_string()
        } else {
            String::new()
        };
        Self {
            ok: true,
            stale: false,
            level: Some(screen.level.as_str().to_string()),
            title: screen.title().to_string(),
            items: screen
                .items
                .into_iter()
                .map(|item| NavListItem {
                    id: item.id,
                    label: item.label,
                })
                .collect(),
            content: screen.content,
            document_url: screen.document_url,
            can_go_back: screen.can_go_back,
            message,
        }
    }

    fn not_rendered(message: impl Into<String>, stale: bool) -> Self {
        Self {
            ok: false,
            stale,
            level: None,
            title: APP_TITLE.to_string(),
            items: Vec::new(),
            content: None,
            document_url: None,
            can_go_back: false,
            message: message.into(),
        }
    }
}

/// Shows (or reloads) the university list.
///
/// # FFI contract
/// - Async call; performs one remote read.
/// - Never panics.
pub fn nav_show_universities() -> NavScreenResponse {
    with_navigator(|navigator| navigator.navigate(NavigationSession::begin_show_root))
}

/// Opens `item_id` from the currently shown list.
///
/// # FFI contract
/// - Async call; performs one remote read.
/// - Never panics; invalid selections return `ok = false`.
pub fn nav_select(item_id: String) -> NavScreenResponse {
    with_navigator(|navigator| navigator.navigate(|session| session.begin_select(&item_id)))
}

/// Returns to the previous level.
///
/// # FFI contract
/// - Async call; re-issues the previous level's read.
/// - Never panics; at the root returns `ok = false`.
pub fn nav_back() -> NavScreenResponse {
    with_navigator(|navigator| navigator.navigate(NavigationSession::begin_back))
}

/// Returns the committed level, if anything is shown.
#[flutter_rust_bridge::frb(sync)]
pub fn nav_current_level() -> Option<String> {
    let navigator = NAVIGATOR.get()?;
    navigator
        .session()
        .current_level()
        .map(|level| level.as_str().to_string())
}

/// Session + dispatcher pair driven by FFI calls.
struct Navigator {
    session: Mutex<NavigationSession>,
    dispatcher: QueryDispatcher<SharedSource>,
}

impl Navigator {
    fn new(source: SharedSource) -> Self {
        Self {
            session: Mutex::new(NavigationSession::new()),
            dispatcher: QueryDispatcher::new(source),
        }
    }

    fn session(&self) -> MutexGuard<'_, NavigationSession> {
        // Commit is a single push/pop, so a poisoned session is still consistent.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn navigate(
        &self,
        begin: impl FnOnce(&mut NavigationSession) -> NavResult<RequestTicket>,
    ) -> NavScreenResponse {
        let ticket = match begin(&mut self.session()) {
            Ok(ticket) => ticket,
            Err(err) => return NavScreenResponse::not_rendered(err.to_string(), false),
        };
        let loaded = Screen::load(&self.dispatcher, &ticket);
        self.finish(ticket, loaded)
    }

    fn finish(
        &self,
        ticket: RequestTicket,
        loaded: Result<Screen, QueryFailure>,
    ) -> NavScreenResponse {
        let mut session = self.session();
        match loaded {
            Ok(screen) => {
                if session.commit(ticket) {
                    NavScreenResponse::rendered(screen)
                } else {
                    NavScreenResponse::not_rendered(SUPERSEDED_MESSAGE, true)
                }
            }
            Err(_) if !session.is_current(&ticket) => {
                NavScreenResponse::not_rendered(SUPERSEDED_MESSAGE, true)
            }
            Err(failure) => {
                warn!(
                    "event=ffi_navigate module=ffi status=error token={} error={}",
                    ticket.token(),
                    failure
                );
                NavScreenResponse::not_rendered(failure.to_string(), false)
            }
        }
    }
}

fn with_navigator(f: impl FnOnce(&Navigator) -> NavScreenResponse) -> NavScreenResponse {
    match NAVIGATOR.get_or_try_init(|| default_source().map(Navigator::new)) {
        Ok(navigator) => f(navigator),
        Err(err) => NavScreenResponse::not_rendered(format!("backend unavailable: {err}"), false),
    }
}

fn default_source() -> Result<SharedSource, String> {
    if let Some(path) = non_blank(std::env::var(FIXTURE_PATH_ENV).ok()) {
        return fixture_source(&path);
    }
    let config = BackendConfig::from_env().map_err(|err| err.to_string())?;
    http_source(&config)
}

fn fixture_source(path: &str) -> Result<SharedSource, String> {
    let source = MemoryTableSource::from_path(path).map_err(|err| err.to_string())?;
    info!("event=backend_select module=ffi status=ok mode=fixture path={path}");
    Ok(Arc::new(source))
}

fn http_source(config: &BackendConfig) -> Result<SharedSource, String> {
    let source = HttpTableSource::new(config).map_err(|err| err.to_string())?;
    info!(
        "event=backend_select module=ffi status=ok mode=http base_url={}",
        source.base_url()
    );
    Ok(Arc::new(source))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
