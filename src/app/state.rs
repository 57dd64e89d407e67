//! Per-session application state and its read-only row view.
//!
//! [`AppState`] is created when the overlay opens and dropped when it closes.
//! It owns the provider set, the mini-app registry, the navigation state and
//! the query text. Nothing in it outlives the session.
//!
//! The presentation layer never looks at the navigation internals directly.
//! It reads [`AppState::rows`], a flat list of [`Row`]s with titles,
//! descriptions, icons, the selected flag and fuzzy-match highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use spotlite::app::AppState;
//! use spotlite::providers::MiniAppRegistry;
//! use spotlite::search::Aggregator;
//!
//! let state = AppState::new(Aggregator::new(), MiniAppRegistry::new());
//! assert!(state.rows().is_empty());
//! assert!(state.is_open());
//! ```

use super::modes::Mode;
use super::navigation::{CurrentList, NavigationState};
use crate::domain::StyleHint;
use crate::providers::MiniAppRegistry;
use crate::search::Aggregator;
use fuzzy_matcher::skim::SkimMatcherV2;

/// One displayable row of the current list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub title: String,
    pub description: String,
    pub selected: bool,
    /// Half-open character ranges of `title` matched by the query.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Icon name or path for catalog rows.
    pub icon: Option<String>,
    pub style: Option<StyleHint>,
}

/// Central state for one overlay session.
#[derive(Debug)]
pub struct AppState {
    /// Current list, selection and mode.
    pub nav: NavigationState,

    /// Text box contents. Always empty in Menu mode.
    pub query: String,

    /// Providers consulted on every text change, in tie-break order.
    pub aggregator: Aggregator,

    /// Mini-apps that can be opened from the results.
    pub registry: MiniAppRegistry,

    open: bool,
}

impl AppState {
    #[must_use]
    pub fn new(aggregator: Aggregator, registry: MiniAppRegistry) -> Self {
        Self {
            nav: NavigationState::new(),
            query: String::new(),
            aggregator,
            registry,
            open: true,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.nav.mode()
    }

    /// `false` once an action has ended the session.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    /// Flat view of the current list for rendering.
    ///
    /// In Search mode titles carry fuzzy-match highlight ranges for the
    /// current query; the fallback row and menu rows carry none.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        let selected = self.nav.selected();

        match self.nav.list() {
            CurrentList::Search(items) => {
                let matcher = (!self.query.is_empty()).then(SkimMatcherV2::default);
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| Row {
                        title: item.display_name.clone(),
                        description: item.description.clone(),
                        selected: selected == Some(index),
                        highlight_ranges: match (&matcher, item.is_fallback()) {
                            (Some(m), false) => {
                                self.compute_highlight_ranges(&item.display_name, m)
                            }
                            _ => Vec::new(),
                        },
                        icon: item.icon.clone(),
                        style: None,
                    })
                    .collect()
            }
            CurrentList::Menu { entries, .. } => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| Row {
                    title: entry.title.clone(),
                    description: entry.description.clone(),
                    selected: selected == Some(index),
                    highlight_ranges: Vec::new(),
                    icon: None,
                    style: entry.style.clone(),
                })
                .collect(),
        }
    }

    /// Coalesces the matcher's character indices into contiguous ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.query) else {
            return Vec::new();
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }
}
