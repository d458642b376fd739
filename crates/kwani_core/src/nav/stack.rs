//! Explicit back-navigation stack.

use super::frame::NavigationFrame;

/// Committed frames, root at index 0, shown frame last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStack {
    frames: Vec<NavigationFrame>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently shown.
    pub fn current(&self) -> Option<&NavigationFrame> {
        self.frames.last()
    }

    /// Frame that `back` returns to.
    pub fn previous(&self) -> Option<&NavigationFrame> {
        self.frames.len().checked_sub(2).map(|idx| &self.frames[idx])
    }

    pub fn push(&mut self, frame: NavigationFrame) {
        self.frames.push(frame);
    }

    /// Removes the shown frame; the root frame is never popped.
    pub fn pop(&mut self) -> Option<NavigationFrame> {
        if self.frames.len() < 2 {
            return None;
        }
        self.frames.pop()
    }

    /// Drops everything and shows `root`.
    pub fn reset(&mut self, root: NavigationFrame) {
        self.frames.clear();
        self.frames.push(root);
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }
}
