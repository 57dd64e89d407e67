//! Item providers: independent sources of ranked candidates.
//!
//! Each provider answers one query at a time and knows nothing about the
//! others. The aggregator calls them in registration order on every keystroke,
//! so `search` must not block: catalogs are loaded up front and only scored
//! per call.
//!
//! # Modules
//!
//! - [`catalog`]: desktop-entry backed providers (applications, settings panels)
//! - [`miniapp`]: mini-app trait, registry and its provider
//! - [`fonts`]: the font preview mini-app

pub mod catalog;
pub mod fonts;
pub mod miniapp;

pub use catalog::DesktopCatalogProvider;
pub use fonts::{FcListFontSource, FontPreviewApp, FontSource};
pub use miniapp::{MiniApp, MiniAppInfo, MiniAppProvider, MiniAppRegistry};

use crate::domain::{CatalogEntry, Result, ScoredItem};
use std::sync::Arc;

/// A source of scored candidates for a query.
pub trait ItemProvider {
    /// Stable identifier used in logs and for snapshot handoff.
    fn name(&self) -> &str;

    /// Scores the provider's catalog against `query`.
    ///
    /// Results need not be sorted. A provider may cap its own result count.
    /// Apart from the mini-app provider, an empty query yields nothing.
    fn search(&self, query: &str) -> Vec<ScoredItem>;

    /// Swaps in a freshly loaded catalog snapshot.
    ///
    /// Returns `false` for providers that are not catalog backed.
    fn replace_catalog(&mut self, entries: Arc<[CatalogEntry]>) -> bool {
        let _ = entries;
        false
    }
}

/// Supplies the raw records behind a catalog provider.
pub trait CatalogSource {
    /// Lists every visible, well-formed record.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be read at all. Individual
    /// unreadable or malformed records are skipped instead.
    fn list_entries(&self) -> Result<Vec<CatalogEntry>>;
}
