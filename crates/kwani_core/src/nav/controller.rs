//! Navigation controller: session + dispatcher + renderer.
//!
//! # Responsibility
//! - Expose one operation per user interaction.
//! - Run read-then-render for each interaction and surface failures.
//!
//! # Invariants
//! - Every accepted interaction ends in a render, a reported failure, or a
//!   silently discarded stale response.
//! - Failures never change the navigation state and are never retried.

use super::frame::Level;
use super::render::Renderer;
use super::screen::Screen;
use super::session::{NavigationSession, RequestTicket};
use super::NavResult;
use crate::dispatch::QueryDispatcher;
use crate::remote::{QueryFailure, TableSource};
use log::{error, info};
use std::time::Instant;

/// Result of one accepted interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Read succeeded and the screen was rendered.
    Rendered(Screen),
    /// Read finished after a newer request was issued; nothing rendered.
    Discarded,
    /// Read failed; state unchanged, failure reported to the renderer.
    Failed(QueryFailure),
}

impl NavOutcome {
    pub fn screen(&self) -> Option<&Screen> {
        match self {
            Self::Rendered(screen) => Some(screen),
            _ => None,
        }
    }
}

/// Drives the hierarchy for one front-end.
pub struct NavigationController<S: TableSource, R: Renderer> {
    session: NavigationSession,
    dispatcher: QueryDispatcher<S>,
    renderer: R,
}

impl<S: TableSource, R: Renderer> NavigationController<S, R> {
    pub fn new(source: S, renderer: R) -> Self {
        Self {
            session: NavigationSession::new(),
            dispatcher: QueryDispatcher::new(source),
            renderer,
        }
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn dispatcher(&self) -> &QueryDispatcher<S> {
        &self.dispatcher
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn level(&self) -> Option<Level> {
        self.session.current_level()
    }

    /// Shows (or reloads) the unfiltered university list.
    pub fn show_universities(&mut self) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_show_root()?;
        Ok(self.run(ticket))
    }

    /// Lists courses of university `id`.
    pub fn select_university(&mut self, id: &str) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_forward(Level::Course, id)?;
        Ok(self.run(ticket))
    }

    /// Lists the distinct years of course `id`.
    pub fn select_course(&mut self, id: &str) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_forward(Level::Year, id)?;
        Ok(self.run(ticket))
    }

    /// Lists every course unit of course `course_id`.
    pub fn select_year(&mut self, course_id: &str) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_forward(Level::CourseUnit, course_id)?;
        Ok(self.run(ticket))
    }

    /// Lists handouts of course unit `id`.
    pub fn select_course_unit(&mut self, id: &str) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_forward(Level::Handout, id)?;
        Ok(self.run(ticket))
    }

    /// Shows the embedded content of handout `id`.
    pub fn select_handout(&mut self, id: &str) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_forward(Level::Content, id)?;
        Ok(self.run(ticket))
    }

    /// Opens item `id` at whatever level is shown.
    pub fn select(&mut self, id: &str) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_select(id)?;
        Ok(self.run(ticket))
    }

    /// Returns to the previous level by re-issuing its query.
    pub fn go_back(&mut self) -> NavResult<NavOutcome> {
        let ticket = self.session.begin_back()?;
        Ok(self.run(ticket))
    }

    fn run(&mut self, ticket: RequestTicket) -> NavOutcome {
        let started_at = Instant::now();
        let level = ticket.target().level();
        let token = ticket.token();
        self.renderer.loading(level);

        match Screen::load(&self.dispatcher, &ticket) {
            Ok(screen) => {
                if !self.session.commit(ticket) {
                    return NavOutcome::Discarded;
                }
                info!(
                    "event=render module=nav status=ok token={} level={} items={} duration_ms={}",
                    token,
                    level,
                    screen.items.len(),
                    started_at.elapsed().as_millis()
                );
                self.renderer.render(&screen);
                NavOutcome::Rendered(screen)
            }
            Err(_) if !self.session.is_current(&ticket) => NavOutcome::Discarded,
            Err(failure) => {
                error!(
                    "event=render module=nav status=error token={} level={} duration_ms={} error_code={} error={}",
                    token,
                    level,
                    started_at.elapsed().as_millis(),
                    failure.kind.as_str(),
                    failure
                );
                self.renderer.report_error(&failure);
                NavOutcome::Failed(failure)
            }
        }
    }
}
