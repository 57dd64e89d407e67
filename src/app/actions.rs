//! What the event handler hands back to its caller.
//!
//! Handling an event yields an [`Outcome`] with two parts:
//!
//! - [`Notification`]s tell the presentation layer what changed so it can
//!   redraw (list contents, highlighted row, input affordance).
//! - [`Action`]s are side effects for the runtime to carry out through the
//!   [`Launcher`](crate::infrastructure::Launcher) collaborator.
//!
//! The handler itself never performs I/O. It issues requests and moves on
//! without waiting for any result.
//!
//! # Example
//!
//! ```rust
//! use spotlite::app::{Action, Outcome};
//!
//! let mut outcome = Outcome::default();
//! outcome.actions.push(Action::Close);
//! assert!(outcome.closes_session());
//! ```

use super::modes::Mode;
use crate::domain::MenuCommand;

/// Side effects requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a catalog command. `command` still contains its field codes;
    /// `name` is the display name used to expand `%c`.
    Launch { command: String, name: String },

    /// Run the default query action (a web search) for `query`.
    RunFallback { query: String },

    /// Carry out a menu entry's bound command. The session stays open.
    RunMenuCommand(MenuCommand),

    /// End the overlay session.
    Close,
}

/// State changes a presentation layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The current list was swapped wholesale.
    ListReplaced { len: usize },

    /// The highlighted row moved. `None` when the list is empty.
    SelectionChanged { index: Option<usize> },

    /// Search and Menu mode swapped; the input affordance changes with it.
    ModeChanged(Mode),

    /// The row at `index` was activated.
    ItemActivated { index: usize },

    /// The query text was cleared by the state machine.
    QueryCleared,
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notifications: Vec<Notification>,
    pub actions: Vec<Action>,
}

impl Outcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty() && self.actions.is_empty()
    }

    /// Whether one of the actions ends the session.
    #[must_use]
    pub fn closes_session(&self) -> bool {
        self.actions.iter().any(|action| matches!(action, Action::Close))
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub(crate) fn request(&mut self, action: Action) {
        self.actions.push(action);
    }
}
