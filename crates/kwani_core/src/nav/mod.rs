//! Navigation state machine for the university -> content hierarchy.
//!
//! # Responsibility
//! - Track which level is shown and how to re-issue each level's query.
//! - Guard transitions: one level forward (select) or one level back.
//! - Discard responses that belong to superseded requests.
//!
//! # Invariants
//! - The view stack only changes when the latest issued request commits.
//! - A failed read leaves the stack untouched.
//! - Frames carry exactly the parent id their level's query needs.

pub mod controller;
pub mod frame;
pub mod render;
pub mod screen;
pub mod session;
pub mod stack;
pub mod year;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub use frame::{Level, NavigationFrame};

pub type NavResult<T> = Result<T, NavigationError>;

/// Rejected navigation requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Requested level is not adjacent to the current one.
    InvalidTransition { from: Option<Level>, to: Level },
    /// Current level has no deeper level to select into.
    NoDeeperLevel(Level),
    /// Root level (or nothing) is shown; there is no previous frame.
    NothingToGoBackTo,
    /// Selection id was blank.
    BlankSelection,
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from: Some(from), to } => {
                write!(f, "cannot navigate from {from} to {to}")
            }
            Self::InvalidTransition { from: None, to } => {
                write!(f, "cannot navigate to {to} before the root list is shown")
            }
            Self::NoDeeperLevel(level) => write!(f, "{level} has no selectable items"),
            Self::NothingToGoBackTo => write!(f, "nothing to go back to"),
            Self::BlankSelection => write!(f, "selection id must not be blank"),
        }
    }
}

impl Error for NavigationError {}
