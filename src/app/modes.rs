//! Mode and direction types for the navigation state machine.
//!
//! The overlay is in exactly one of two modes:
//! - **Search**: the text box drives aggregation and the list holds ranked
//!   results followed by the fallback item
//! - **Menu**: a mini-app's drill-down list; the text box is hidden and a back
//!   control is shown instead
//!
//! There is a single nesting level. Menu mode is only ever entered from Search
//! mode and always returns to it.
//!
//! # Example
//!
//! ```rust
//! use spotlite::app::{Direction, Mode};
//!
//! assert_eq!(Mode::default(), Mode::Search);
//! assert!(!Mode::Menu.shows_text_input());
//! assert_ne!(Direction::Up, Direction::Down);
//! ```

/// Which list the overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Ranked search results for the current query.
    #[default]
    Search,

    /// A mini-app's own entries.
    Menu,
}

impl Mode {
    /// Whether the text input is visible. In Menu mode a back control replaces
    /// it.
    #[must_use]
    pub const fn shows_text_input(self) -> bool {
        matches!(self, Self::Search)
    }
}

/// Direction of a keyboard navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}
