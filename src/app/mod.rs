//! Application layer: the selection and navigation state machine.
//!
//! Sits between the presentation shim (main.rs) and the search/provider
//! layers. Data flows one way:
//!
//! ```text
//! Input → Event → handle_event → AppState mutation → Outcome
//!                                                     ├─ Notifications → redraw
//!                                                     └─ Actions → runtime → Launcher
//! ```
//!
//! # Modules
//!
//! - [`actions`]: actions, notifications and the per-event outcome
//! - [`handler`]: the transition table
//! - [`modes`]: Search/Menu mode and navigation direction
//! - [`navigation`]: current list and selection cursor
//! - [`state`]: per-session state and the row view

pub mod actions;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod state;

pub use actions::{Action, Notification, Outcome};
pub use handler::{handle_event, Event};
pub use modes::{Direction, Mode};
pub use navigation::{CurrentList, NavigationState};
pub use state::{AppState, Row};
