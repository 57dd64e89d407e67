//! Catalog-backed providers for installed applications and settings panels.
//!
//! The catalog is read once, deduplicated by exact name and frozen into an
//! `Arc<[CatalogEntry]>` snapshot. Searching only scores the snapshot. A reload
//! builds a whole new snapshot and swaps it in with
//! [`DesktopCatalogProvider::replace_snapshot`]; the previous snapshot is never
//! edited.

use super::{CatalogSource, ItemProvider};
use crate::domain::{CatalogEntry, ScoredItem};
use crate::search::effective_score;
use std::collections::HashSet;
use std::sync::Arc;

/// Provider name for installed applications.
pub const APPLICATIONS: &str = "applications";

/// Provider name for system settings panels.
pub const SETTINGS: &str = "settings";

/// Ranks a frozen list of catalog records with the generic scorer.
pub struct DesktopCatalogProvider {
    name: String,
    entries: Arc<[CatalogEntry]>,
    max_results: Option<usize>,
}

impl DesktopCatalogProvider {
    /// Creates a provider over an in-memory record list.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        entries: Vec<CatalogEntry>,
        max_results: Option<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            entries: dedup_by_name(entries),
            max_results,
        }
    }

    /// Loads the catalog from `source`.
    ///
    /// A source that fails to load leaves the provider empty; the failure is
    /// logged and search carries on with the other providers.
    #[must_use]
    pub fn load(
        name: impl Into<String>,
        source: &dyn CatalogSource,
        max_results: Option<usize>,
    ) -> Self {
        let name = name.into();
        let entries = source.list_entries().unwrap_or_else(|e| {
            tracing::warn!(provider = %name, error = %e, "catalog load failed, provider disabled");
            Vec::new()
        });
        tracing::debug!(provider = %name, count = entries.len(), "catalog loaded");
        Self::new(name, entries, max_results)
    }

    /// Installs a new snapshot, deduplicating it the same way as at load time.
    pub fn replace_snapshot(&mut self, entries: Arc<[CatalogEntry]>) {
        self.entries = dedup_by_name(entries.iter().cloned().collect());
        tracing::debug!(
            provider = %self.name,
            count = self.entries.len(),
            "catalog snapshot replaced"
        );
    }

    /// The snapshot currently being searched.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[CatalogEntry]> {
        Arc::clone(&self.entries)
    }
}

impl ItemProvider for DesktopCatalogProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &str) -> Vec<ScoredItem> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<ScoredItem> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = effective_score(query, &entry.name, &entry.description);
                (score > 0).then(|| {
                    ScoredItem::launchable(&entry.name, &entry.description, &entry.exec, score)
                        .with_icon(entry.icon.clone())
                })
            })
            .collect();

        if let Some(limit) = self.max_results {
            results.sort_by(|a, b| b.score.cmp(&a.score));
            results.truncate(limit);
        }

        results
    }

    fn replace_catalog(&mut self, entries: Arc<[CatalogEntry]>) -> bool {
        self.replace_snapshot(entries);
        true
    }
}

/// Keeps the first record for every exact name.
fn dedup_by_name(entries: Vec<CatalogEntry>) -> Arc<[CatalogEntry]> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let first = seen.insert(entry.name.clone());
            if !first {
                tracing::trace!(name = %entry.name, source = ?entry.source, "duplicate dropped");
            }
            first
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemKind, SpotliteError};

    struct Broken;

    impl CatalogSource for Broken {
        fn list_entries(&self) -> crate::domain::Result<Vec<CatalogEntry>> {
            Err(SpotliteError::Catalog("directory unreadable".to_string()))
        }
    }

    fn firefox() -> CatalogEntry {
        CatalogEntry::new("Firefox", "Web browser", "firefox %u")
    }

    #[test]
    fn results_carry_the_catalog_icon() {
        let entry = CatalogEntry {
            icon: Some("firefox".to_string()),
            ..firefox()
        };
        let provider = DesktopCatalogProvider::new(APPLICATIONS, vec![entry], None);
        assert_eq!(provider.search("fire")[0].icon.as_deref(), Some("firefox"));
    }

    #[test]
    fn empty_query_returns_nothing() {
        let provider = DesktopCatalogProvider::new(APPLICATIONS, vec![firefox()], None);
        assert!(provider.search("").is_empty());
    }

    #[test]
    fn matches_carry_command_and_score() {
        let provider = DesktopCatalogProvider::new(APPLICATIONS, vec![firefox()], Some(20));
        let results = provider.search("fi");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 90);
        assert_eq!(
            results[0].kind,
            ItemKind::Launchable {
                command: "firefox %u".to_string()
            }
        );
    }

    #[test]
    fn description_only_match_is_half_weight() {
        let provider = DesktopCatalogProvider::new(APPLICATIONS, vec![firefox()], None);
        let results = provider.search("browser");
        assert_eq!(results[0].score, 35);
    }

    #[test]
    fn duplicates_by_exact_name_keep_first() {
        let entries = vec![
            CatalogEntry::new("Files", "first", "nautilus"),
            CatalogEntry::new("Files", "second", "thunar"),
            CatalogEntry::new("files", "different case", "pcmanfm"),
        ];
        let provider = DesktopCatalogProvider::new(APPLICATIONS, entries, None);
        let results = provider.search("files");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].description, "first");
    }

    #[test]
    fn cap_keeps_best_scores() {
        let entries = vec![
            CatalogEntry::new("Xterm Alt", "", "a"),
            CatalogEntry::new("Terminal", "", "b"),
            CatalogEntry::new("Tilix Emulator Remote", "", "c"),
        ];
        let provider = DesktopCatalogProvider::new(APPLICATIONS, entries, Some(1));
        let results = provider.search("term");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Terminal");
    }

    #[test]
    fn failed_source_degrades_to_empty() {
        let provider = DesktopCatalogProvider::load(SETTINGS, &Broken, None);
        assert!(provider.snapshot().is_empty());
        assert!(provider.search("display").is_empty());
    }

    #[test]
    fn replacing_snapshot_leaves_old_one_untouched() {
        let mut provider = DesktopCatalogProvider::new(APPLICATIONS, vec![firefox()], None);
        let old = provider.snapshot();

        let fresh: Arc<[CatalogEntry]> =
            vec![CatalogEntry::new("Chromium", "Web browser", "chromium")].into();
        assert!(provider.replace_catalog(fresh));

        assert_eq!(old.len(), 1);
        assert_eq!(old[0].name, "Firefox");
        assert!(provider.search("fire").is_empty());
        assert_eq!(provider.search("chro").len(), 1);
    }
}
