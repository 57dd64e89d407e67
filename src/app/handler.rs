//! Event handling and state transitions.
//!
//! [`handle_event`] is the whole state machine. It consumes one input event,
//! mutates [`AppState`] and returns an [`Outcome`] listing what changed and
//! which side effects to run.
//!
//! # Transitions
//!
//! | Mode   | Event                     | Result                                         |
//! |--------|---------------------------|------------------------------------------------|
//! | Search | text changed (empty)      | list cleared, nothing selected                 |
//! | Search | text changed              | list := aggregated results, row 0 selected     |
//! | any    | navigate                  | selection moves, wrapping at both ends         |
//! | Search | activate launchable       | launch requested, session closes               |
//! | Search | activate mini-app entry   | Menu mode with the mini-app's entries          |
//! | Search | activate fallback         | fallback requested, session closes             |
//! | Search | escape                    | session closes                                 |
//! | Menu   | activate                  | entry command requested, stays in Menu mode    |
//! | Menu   | escape / back             | Search mode, empty list, empty query           |
//!
//! Text changes are ignored in Menu mode. Out-of-range indices are ignored
//! everywhere. Once the session has closed, every event is ignored.
//!
//! # Example
//!
//! ```rust
//! use spotlite::app::{handle_event, AppState, Event, Mode};
//! use spotlite::providers::MiniAppRegistry;
//! use spotlite::search::Aggregator;
//!
//! let mut state = AppState::new(Aggregator::new(), MiniAppRegistry::new());
//! let outcome = handle_event(&mut state, &Event::TextChanged("fi".into()));
//! assert_eq!(state.rows().len(), 1); // only the fallback row
//! assert!(outcome.actions.is_empty());
//! assert_eq!(state.mode(), Mode::Search);
//! ```

use super::actions::{Action, Notification, Outcome};
use super::modes::{Direction, Mode};
use super::state::AppState;
use crate::domain::{CatalogEntry, ItemKind};
use std::sync::Arc;

/// Input events fed in by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The text box now holds this text.
    TextChanged(String),
    /// Arrow key.
    Navigate(Direction),
    /// Pointer hover over a row.
    Select(usize),
    /// Enter on the selected row.
    Activate,
    /// Click on a row: select it, then activate it.
    ActivateAt(usize),
    Escape,
    /// The back control shown in Menu mode.
    Back,

    /// A catalog provider's records were reloaded in the background.
    ///
    /// The new snapshot is handed over whole. If a non-empty query is on
    /// screen in Search mode, results are recomputed against it.
    CatalogReloaded {
        provider: String,
        entries: Arc<[CatalogEntry]>,
    },
}

/// Applies `event` to `state`.
///
/// Never fails: events that do not apply in the current mode, or that point
/// outside the current list, produce an empty [`Outcome`].
pub fn handle_event(state: &mut AppState, event: &Event) -> Outcome {
    let _span =
        tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.mode()).entered();

    let mut outcome = Outcome::default();

    if !state.is_open() {
        tracing::debug!("session closed, ignoring event");
        return outcome;
    }

    match event {
        Event::TextChanged(text) => {
            if state.mode() == Mode::Menu {
                tracing::debug!("text change ignored in menu mode");
                return outcome;
            }
            state.query.clone_from(text);
            refresh_results(state, &mut outcome);
        }
        Event::Navigate(direction) => {
            if state.nav.navigate(*direction) {
                outcome.notify(Notification::SelectionChanged {
                    index: state.nav.selected(),
                });
            }
        }
        Event::Select(index) => {
            if state.nav.select(*index) {
                outcome.notify(Notification::SelectionChanged {
                    index: state.nav.selected(),
                });
            }
        }
        Event::Activate => match state.nav.selected() {
            Some(index) => activate(state, index, &mut outcome),
            None => tracing::debug!("nothing selected"),
        },
        Event::ActivateAt(index) => {
            if *index >= state.nav.len() {
                tracing::debug!(index, len = state.nav.len(), "ignoring out-of-range activation");
                return outcome;
            }
            if state.nav.select(*index) {
                outcome.notify(Notification::SelectionChanged { index: Some(*index) });
            }
            activate(state, *index, &mut outcome);
        }
        Event::Escape => match state.mode() {
            Mode::Search => close(state, &mut outcome),
            Mode::Menu => exit_menu(state, &mut outcome),
        },
        Event::Back => match state.mode() {
            Mode::Menu => exit_menu(state, &mut outcome),
            Mode::Search => tracing::debug!("back ignored in search mode"),
        },
        Event::CatalogReloaded { provider, entries } => {
            let replaced = state
                .aggregator
                .provider_mut(provider)
                .is_some_and(|p| p.replace_catalog(Arc::clone(entries)));

            if !replaced {
                tracing::warn!(provider = %provider, "no catalog provider accepted the snapshot");
                return outcome;
            }

            if state.mode() == Mode::Search && !state.query.is_empty() {
                refresh_results(state, &mut outcome);
            }
        }
    }

    outcome
}

/// Rebuilds the Search list from the current query.
fn refresh_results(state: &mut AppState, outcome: &mut Outcome) {
    let items = if state.query.is_empty() {
        Vec::new()
    } else {
        state.aggregator.aggregate(&state.query)
    };

    state.nav.replace_search_list(items);
    outcome.notify(Notification::ListReplaced { len: state.nav.len() });
    outcome.notify(Notification::SelectionChanged {
        index: state.nav.selected(),
    });
}

fn activate(state: &mut AppState, index: usize, outcome: &mut Outcome) {
    match state.mode() {
        Mode::Search => activate_result(state, index, outcome),
        Mode::Menu => {
            let Some(entry) = state.nav.menu_entry(index) else {
                return;
            };
            tracing::debug!(index, title = %entry.title, "menu entry activated");
            let command = entry.command.clone();
            outcome.notify(Notification::ItemActivated { index });
            outcome.request(Action::RunMenuCommand(command));
        }
    }
}

fn activate_result(state: &mut AppState, index: usize, outcome: &mut Outcome) {
    let Some(item) = state.nav.search_item(index) else {
        return;
    };

    tracing::debug!(index, name = %item.display_name, kind = ?item.kind, "result activated");

    match item.kind.clone() {
        ItemKind::Launchable { command } => {
            let name = item.display_name.clone();
            outcome.notify(Notification::ItemActivated { index });
            outcome.request(Action::Launch { command, name });
            close(state, outcome);
        }
        ItemKind::FallbackAction => {
            outcome.notify(Notification::ItemActivated { index });
            outcome.request(Action::RunFallback {
                query: state.query.clone(),
            });
            close(state, outcome);
        }
        ItemKind::SubAppEntry { app_id } => {
            let Some(entries) = state.registry.menu_entries(&app_id) else {
                tracing::debug!(app_id = %app_id, "no mini-app registered under this id");
                return;
            };

            outcome.notify(Notification::ItemActivated { index });
            state.nav.enter_menu(app_id, entries);
            state.query.clear();
            outcome.notify(Notification::ModeChanged(Mode::Menu));
            outcome.notify(Notification::QueryCleared);
            outcome.notify(Notification::ListReplaced { len: state.nav.len() });
            outcome.notify(Notification::SelectionChanged {
                index: state.nav.selected(),
            });
        }
    }
}

fn exit_menu(state: &mut AppState, outcome: &mut Outcome) {
    tracing::debug!(app_id = ?state.nav.active_menu_provider(), "leaving menu mode");
    state.nav.reset();
    state.query.clear();
    outcome.notify(Notification::ModeChanged(Mode::Search));
    outcome.notify(Notification::QueryCleared);
    outcome.notify(Notification::ListReplaced { len: 0 });
    outcome.notify(Notification::SelectionChanged { index: None });
}

fn close(state: &mut AppState, outcome: &mut Outcome) {
    tracing::debug!("closing session");
    outcome.request(Action::Close);
    state.close();
}
