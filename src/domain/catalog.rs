//! Raw catalog records.

use std::path::PathBuf;

/// One launchable record from an application or settings catalog.
///
/// Produced by a [`CatalogSource`](crate::providers::CatalogSource) after
/// filtering: a record that reaches a provider always has a non-empty `name`
/// and `exec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    /// Command line as written in the descriptor, field codes included.
    pub exec: String,
    pub icon: Option<String>,
    /// Descriptor file this record was parsed from.
    pub source: PathBuf,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        exec: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exec: exec.into(),
            icon: None,
            source: PathBuf::new(),
        }
    }
}
