//! Renderer seam between the navigator and a front-end.

use super::frame::Level;
use super::screen::Screen;
use crate::remote::QueryFailure;

/// Draws screens and surfaces failures.
///
/// Implementations own the actual display; the controller only decides
/// what to show and when.
pub trait Renderer {
    /// A read for `level` has started.
    fn loading(&mut self, _level: Level) {}

    /// Replaces the visible level with `screen`.
    fn render(&mut self, screen: &Screen);

    /// A read failed; the previously rendered screen stays visible.
    fn report_error(&mut self, failure: &QueryFailure);
}

/// Records every callback; useful for headless front-ends and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub loading: Vec<Level>,
    pub screens: Vec<Screen>,
    pub errors: Vec<QueryFailure>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_screen(&self) -> Option<&Screen> {
        self.screens.last()
    }
}

impl Renderer for RecordingRenderer {
    fn loading(&mut self, level: Level) {
        self.loading.push(level);
    }

    fn render(&mut self, screen: &Screen) {
        self.screens.push(screen.clone());
    }

    fn report_error(&mut self, failure: &QueryFailure) {
        self.errors.push(failure.clone());
    }
}
