//! Mini-apps: small built-in tools that open their own item list.
//!
//! A mini-app shows up in search results as a [`SubAppEntry`] item. Activating
//! it switches the overlay into menu mode with the entries returned by
//! [`MiniApp::menu_entries`].
//!
//! The [`MiniAppRegistry`] is an explicit object created for one overlay
//! session. [`MiniAppProvider`] is built from a copy of the registry's
//! descriptors and ranks them with a fixed policy of its own:
//!
//! | Condition (case-insensitive)               | Score    |
//! |--------------------------------------------|----------|
//! | name contains the query                    | 90       |
//! | description contains the query             | 70       |
//! | query shorter than 2 characters            | 50       |
//! | otherwise                                  | excluded |
//!
//! This policy is deliberately separate from the generic scorer.
//!
//! [`SubAppEntry`]: crate::domain::ItemKind::SubAppEntry

use super::ItemProvider;
use crate::domain::{MenuEntry, ScoredItem};

/// Provider name for mini-apps.
pub const MINI_APPS: &str = "mini-apps";

const NAME_MATCH: u8 = 90;
const DESCRIPTION_MATCH: u8 = 70;
const SHORT_QUERY: u8 = 50;
const SHORT_QUERY_CHARS: usize = 2;

/// A built-in tool with a drill-down list.
pub trait MiniApp {
    /// Computes the menu on demand. Called once per entry into menu mode.
    fn menu_entries(&self) -> Vec<MenuEntry>;
}

/// Static description of a registered mini-app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniAppInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl MiniAppInfo {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

struct Registered {
    info: MiniAppInfo,
    app: Box<dyn MiniApp>,
}

/// Mini-apps available to one overlay session, in registration order.
#[derive(Default)]
pub struct MiniAppRegistry {
    apps: Vec<Registered>,
}

impl MiniAppRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `app` under `info.id`. An existing registration with the same
    /// identifier is replaced in place.
    pub fn register(&mut self, info: MiniAppInfo, app: Box<dyn MiniApp>) {
        tracing::debug!(app_id = %info.id, name = %info.name, "registering mini-app");
        if let Some(existing) = self.apps.iter_mut().find(|r| r.info.id == info.id) {
            existing.info = info;
            existing.app = app;
        } else {
            self.apps.push(Registered { info, app });
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.apps.iter().any(|r| r.info.id == id)
    }

    /// Snapshot of every registered descriptor.
    #[must_use]
    pub fn descriptors(&self) -> Vec<MiniAppInfo> {
        self.apps.iter().map(|r| r.info.clone()).collect()
    }

    /// Asks the mini-app `id` for its menu. `None` if nothing is registered
    /// under that identifier.
    #[must_use]
    pub fn menu_entries(&self, id: &str) -> Option<Vec<MenuEntry>> {
        let registered = self.apps.iter().find(|r| r.info.id == id)?;
        let entries = registered.app.menu_entries();
        tracing::debug!(app_id = %id, count = entries.len(), "mini-app menu computed");
        Some(entries)
    }

    /// A provider over the current descriptors.
    #[must_use]
    pub fn provider(&self) -> MiniAppProvider {
        MiniAppProvider::new(self.descriptors())
    }
}

impl std::fmt::Debug for MiniAppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniAppRegistry")
            .field("apps", &self.descriptors())
            .finish()
    }
}

/// Ranks mini-app descriptors. The only provider that answers empty and
/// one-character queries.
#[derive(Debug, Clone)]
pub struct MiniAppProvider {
    apps: Vec<MiniAppInfo>,
}

impl MiniAppProvider {
    #[must_use]
    pub const fn new(apps: Vec<MiniAppInfo>) -> Self {
        Self { apps }
    }

    fn score(info: &MiniAppInfo, query_lower: &str) -> Option<u8> {
        if info.name.to_lowercase().contains(query_lower) {
            Some(NAME_MATCH)
        } else if info.description.to_lowercase().contains(query_lower) {
            Some(DESCRIPTION_MATCH)
        } else if query_lower.chars().count() < SHORT_QUERY_CHARS {
            Some(SHORT_QUERY)
        } else {
            None
        }
    }
}

impl ItemProvider for MiniAppProvider {
    fn name(&self) -> &str {
        MINI_APPS
    }

    fn search(&self, query: &str) -> Vec<ScoredItem> {
        let query_lower = query.to_lowercase();
        self.apps
            .iter()
            .filter_map(|info| {
                Self::score(info, &query_lower).map(|score| {
                    ScoredItem::sub_app(&info.name, &info.description, &info.id, score)
                })
            })
            .collect()
    }
}
