//! Request-token session over the view stack.
//!
//! # Responsibility
//! - Validate a requested transition against the committed stack.
//! - Issue monotonically increasing tokens and commit only the latest one.
//!
//! # Invariants
//! - Issuing a ticket supersedes all earlier tickets.
//! - A ticket commits at most once (`commit` consumes it).
//! - Stale or abandoned tickets never touch the stack.

use super::frame::{Level, NavigationFrame};
use super::stack::ViewStack;
use super::{NavResult, NavigationError};
use log::{debug, info};

/// How a committed ticket changes the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Show (or reload) the root list.
    Reset,
    /// One level deeper.
    Forward,
    /// One level back.
    Back,
}

/// Outstanding navigation request.
///
/// Carries everything needed to fetch the target level without holding the
/// session, so reads can run while other interactions are processed.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestTicket {
    token: u64,
    kind: TransitionKind,
    target: NavigationFrame,
    can_go_back: bool,
}

impl RequestTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Frame whose query must be issued.
    pub fn target(&self) -> &NavigationFrame {
        &self.target
    }

    /// Whether the target screen will offer a back action once committed.
    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }
}

/// Navigation state shared by every front-end.
#[derive(Debug, Default)]
pub struct NavigationSession {
    stack: ViewStack,
    latest_token: u64,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &ViewStack {
        &self.stack
    }

    pub fn current(&self) -> Option<&NavigationFrame> {
        self.stack.current()
    }

    pub fn current_level(&self) -> Option<Level> {
        self.stack.current().map(NavigationFrame::level)
    }

    /// Token of the most recently issued ticket (0 before the first).
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Requests the root university list.
    ///
    /// Allowed before anything is shown and as a reload of the root level.
    pub fn begin_show_root(&mut self) -> NavResult<RequestTicket> {
        match self.current_level() {
            None | Some(Level::University) => {
                Ok(self.issue(TransitionKind::Reset, NavigationFrame::Universities))
            }
            from => Err(NavigationError::InvalidTransition {
                from,
                to: Level::University,
            }),
        }
    }

    /// Requests the level directly below the current one.
    ///
    /// # Errors
    /// - `InvalidTransition` when `level` is not exactly one level deeper.
    /// - `BlankSelection` when `parent_id` is blank.
    pub fn begin_forward(&mut self, level: Level, parent_id: &str) -> NavResult<RequestTicket> {
        let from = self.current_level();
        if from.is_none() || from.and_then(Level::next) != Some(level) {
            return Err(NavigationError::InvalidTransition { from, to: level });
        }
        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            return Err(NavigationError::BlankSelection);
        }
        let target = NavigationFrame::child(level, parent_id)
            .ok_or(NavigationError::InvalidTransition { from, to: level })?;
        Ok(self.issue(TransitionKind::Forward, target))
    }

    /// Requests whatever level an item selected at the current level opens.
    pub fn begin_select(&mut self, item_id: &str) -> NavResult<RequestTicket> {
        let current = self.current_level().ok_or(NavigationError::InvalidTransition {
            from: None,
            to: Level::Course,
        })?;
        let next = current.next().ok_or(NavigationError::NoDeeperLevel(current))?;
        self.begin_forward(next, item_id)
    }

    /// Requests the previous frame, re-issuing its original query.
    pub fn begin_back(&mut self) -> NavResult<RequestTicket> {
        let target = self
            .stack
            .previous()
            .cloned()
            .ok_or(NavigationError::NothingToGoBackTo)?;
        Ok(self.issue(TransitionKind::Back, target))
    }

    /// Whether `ticket` is still the latest request.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.token == self.latest_token
    }

    /// Applies a ticket whose read succeeded.
    ///
    /// Returns `false` (and changes nothing) when a newer ticket has been
    /// issued since, i.e. the response is stale.
    pub fn commit(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                "event=navigate module=nav status=stale token={} latest_token={} level={}",
                ticket.token,
                self.latest_token,
                ticket.target.level()
            );
            return false;
        }

        match ticket.kind {
            TransitionKind::Reset => self.stack.reset(ticket.target),
            TransitionKind::Forward => self.stack.push(ticket.target),
            TransitionKind::Back => {
                self.stack.pop();
            }
        }

        info!(
            "event=navigate module=nav status=ok token={} kind={:?} level={} depth={}",
            ticket.token,
            ticket.kind,
            self.current_level().map_or("none", Level::as_str),
            self.stack.depth()
        );
        true
    }

    fn issue(&mut self, kind: TransitionKind, target: NavigationFrame) -> RequestTicket {
        self.latest_token += 1;
        let can_go_back = target.level() != Level::University;
        debug!(
            "event=navigate module=nav status=start token={} kind={:?} level={}",
            self.latest_token,
            kind,
            target.level()
        );
        RequestTicket {
            token: self.latest_token,
            kind,
            target,
            can_go_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationSession, TransitionKind};
    use crate::nav::frame::{Level, NavigationFrame};
    use crate::nav::NavigationError;

    fn at_years() -> NavigationSession {
        let mut session = NavigationSession::new();
        let root = session.begin_show_root().expect("root");
        assert!(session.commit(root));
        let courses = session.begin_select("u1").expect("courses");
        assert!(session.commit(courses));
        let years = session.begin_select("c1").expect("years");
        assert!(session.commit(years));
        session
    }

    #[test]
    fn select_walks_one_level_at_a_time() {
        let session = at_years();
        assert_eq!(session.current_level(), Some(Level::Year));
        assert_eq!(
            session.stack().previous(),
            Some(&NavigationFrame::Courses {
                university_id: "u1".to_string()
            })
        );
        assert_eq!(session.latest_token(), 3);
    }

    #[test]
    fn rejects_jumps_and_selection_before_root() {
        let mut empty = NavigationSession::new();
        assert!(matches!(
            empty.begin_select("u1"),
            Err(NavigationError::InvalidTransition { from: None, .. })
        ));

        let mut session = at_years();
        let err = session
            .begin_forward(Level::Handout, "cu1")
            .expect_err("skipping course units must fail");
        assert_eq!(
            err,
            NavigationError::InvalidTransition {
                from: Some(Level::Year),
                to: Level::Handout
            }
        );
        assert!(matches!(
            session.begin_show_root(),
            Err(NavigationError::InvalidTransition { .. })
        ));
        assert_eq!(
            session.begin_select("   "),
            Err(NavigationError::BlankSelection)
        );
    }

    #[test]
    fn back_targets_previous_frame_and_pops_on_commit() {
        let mut session = at_years();
        let back = session.begin_back().expect("back");
        assert_eq!(back.kind(), TransitionKind::Back);
        assert_eq!(back.target().level(), Level::Course);
        assert!(back.can_go_back());
        assert!(session.commit(back));
        assert_eq!(session.current_level(), Some(Level::Course));

        let back = session.begin_back().expect("back to root");
        assert!(!back.can_go_back());
        assert!(session.commit(back));
        assert_eq!(
            session.begin_back().expect_err("root has no previous"),
            NavigationError::NothingToGoBackTo
        );
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut session = at_years();
        let slow = session.begin_select("c1").expect("course units");
        let fast = session.begin_back().expect("back");

        assert!(!session.is_current(&slow));
        assert!(!session.commit(slow));
        assert_eq!(session.current_level(), Some(Level::Year));

        assert!(session.commit(fast));
        assert_eq!(session.current_level(), Some(Level::Course));
    }

    #[test]
    fn unused_ticket_leaves_stack_unchanged() {
        let mut session = at_years();
        let before = session.stack().clone();
        let _failed = session.begin_select("c1").expect("ticket");
        assert_eq!(session.stack(), &before);
    }

    #[test]
    fn content_level_has_nothing_to_select() {
        let mut session = at_years();
        for id in ["c1", "cu1", "h1"] {
            let ticket = session.begin_select(id).expect("forward");
            assert!(session.commit(ticket));
        }
        assert_eq!(session.current_level(), Some(Level::Content));
        assert_eq!(
            session.begin_select("x"),
            Err(NavigationError::NoDeeperLevel(Level::Content))
        );
    }
}
