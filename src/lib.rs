//! Spotlite: the core of a keyboard-driven quick launcher overlay.
//!
//! As the user types, Spotlite ranks matches from several independent item
//! providers and shows them in one list that ends with a web-search fallback:
//! - Installed applications and system settings panels, read from
//!   desktop-entry files and ranked with a tiered similarity score
//! - Built-in mini-apps, which open their own drill-down list ("menu mode")
//!   when activated
//! - A trailing "Search <query>" action that opens a web search

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation shim (main.rs) + runtime              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search / Menu modes, selection                   │
//! │  - Notifications and actions                        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌──────────────────────┐
//! │ Search        │   │ Providers            │
//! │ (search/)     │   │ (providers/)         │
//! │ - Scorer      │   │ - Desktop catalogs   │
//! │ - Aggregator  │   │ - Mini-app registry  │
//! └───────────────┘   └──────────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - XDG paths, desktop entries, launcher             │
//! │  - Item types, error type                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a rotating JSONL file   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! A TOML file, by default `~/.config/spotlite/config.toml`. Every key is
//! optional:
//!
//! ```toml
//! application_dirs = ["~/.local/share/applications", "/usr/share/applications"]
//! settings_dirs = ["/usr/share/applications"]
//! settings_pattern = "gnome-*-panel.desktop"
//! max_app_results = 20
//! fallback_url = "https://duckduckgo.com/?q={query}"
//! shell = "bash"
//! opener = "xdg-open"
//! clipboard_command = ["wl-copy"]
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use spotlite::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     application_dirs: vec!["/nonexistent".to_string()],
//!     settings_dirs: vec!["/nonexistent".to_string()],
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! handle_event(&mut state, &Event::TextChanged("font".to_string()));
//! let rows = state.rows();
//! assert_eq!(rows[0].title, "Font Demo");
//! assert_eq!(rows[1].title, "Search font");
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod providers;
pub mod runtime;
pub mod search;

pub use app::{handle_event, Action, AppState, Direction, Event, Mode, Notification, Outcome, Row};
pub use domain::{Result, SpotliteError};

use domain::CatalogEntry;
use infrastructure::paths::{self, expand_tilde};
use infrastructure::{compile_pattern, DesktopDirectorySource};
use providers::catalog::{APPLICATIONS, SETTINGS};
use providers::{CatalogSource, DesktopCatalogProvider, FontPreviewApp, MiniAppRegistry};
use search::Aggregator;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_SETTINGS_PATTERN: &str = "gnome-*-panel.desktop";
const DEFAULT_MAX_APP_RESULTS: usize = 20;
const MAX_APP_RESULTS_LIMIT: usize = 100;
const DEFAULT_FALLBACK_URL: &str = "https://www.google.com/search?q={query}";

/// Launcher configuration.
///
/// Loaded from TOML with [`Config::load`], adjusted with
/// [`Config::apply_overrides`] and checked with [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directories scanned for application entries. Empty means XDG
    /// discovery. A leading `~` is expanded.
    pub application_dirs: Vec<String>,

    /// Directories scanned for settings panels. Empty means
    /// `/usr/share/applications` and `/usr/local/share/applications`.
    pub settings_dirs: Vec<String>,

    /// File-name glob (`*`, `?`, `[...]`) selecting settings panels.
    pub settings_pattern: String,

    /// Cap on application results per query, `1..=100`.
    pub max_app_results: usize,

    /// Fallback search URL. `{query}` is replaced by the encoded query.
    pub fallback_url: String,

    /// Shell used to run launch commands as `<shell> -c <command>`.
    pub shell: String,

    /// Program used to open the fallback URL.
    pub opener: String,

    /// Program and arguments that read clipboard text from stdin.
    pub clipboard_command: Vec<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn` or `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_dirs: Vec::new(),
            settings_dirs: Vec::new(),
            settings_pattern: DEFAULT_SETTINGS_PATTERN.to_string(),
            max_app_results: DEFAULT_MAX_APP_RESULTS,
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            shell: "bash".to_string(),
            opener: "xdg-open".to_string(),
            clipboard_command: vec!["wl-copy".to_string()],
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SpotliteError::Io`] if the file cannot be read and
    /// [`SpotliteError::ConfigParse`] if it is not valid config TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses config TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SpotliteError::ConfigParse`] on malformed input or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spotlite::Config;
    ///
    /// let config = Config::from_toml_str("max_app_results = 5").unwrap();
    /// assert_eq!(config.max_app_results, 5);
    /// assert_eq!(config.shell, "bash");
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `key=value` overrides, typically from the command line.
    ///
    /// List-valued keys (`application_dirs`, `settings_dirs`) take
    /// comma-separated values; `clipboard_command` is split on whitespace.
    /// The `config` key names the config file and is skipped here.
    ///
    /// # Errors
    ///
    /// Returns [`SpotliteError::Config`] for an unknown key or a value that
    /// does not parse.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use spotlite::Config;
    ///
    /// let mut overrides = BTreeMap::new();
    /// overrides.insert("application_dirs".to_string(), "~/apps, /opt/apps".to_string());
    /// overrides.insert("max_app_results".to_string(), "5".to_string());
    ///
    /// let mut config = Config::default();
    /// config.apply_overrides(&overrides)?;
    /// assert_eq!(config.application_dirs, vec!["~/apps", "/opt/apps"]);
    /// assert_eq!(config.max_app_results, 5);
    /// # Ok::<(), spotlite::SpotliteError>(())
    /// ```
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "config" => {}
                "application_dirs" => self.application_dirs = split_list(value),
                "settings_dirs" => self.settings_dirs = split_list(value),
                "settings_pattern" => self.settings_pattern.clone_from(value),
                "max_app_results" => {
                    self.max_app_results = value.trim().parse().map_err(|e| {
                        SpotliteError::Config(format!("max_app_results: {e}"))
                    })?;
                }
                "fallback_url" => self.fallback_url.clone_from(value),
                "shell" => self.shell.clone_from(value),
                "opener" => self.opener.clone_from(value),
                "clipboard_command" => {
                    self.clipboard_command = value.split_whitespace().map(String::from).collect();
                }
                "trace_level" => self.trace_level = Some(value.clone()),
                other => return Err(SpotliteError::Config(format!("unknown key: {other}"))),
            }
        }
        Ok(())
    }

    /// Checks values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`SpotliteError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_APP_RESULTS_LIMIT).contains(&self.max_app_results) {
            return Err(SpotliteError::Config(format!(
                "max_app_results must be between 1 and {MAX_APP_RESULTS_LIMIT}, got {}",
                self.max_app_results
            )));
        }
        if !self.fallback_url.contains(infrastructure::launcher::QUERY_PLACEHOLDER) {
            return Err(SpotliteError::Config(
                "fallback_url must contain {query}".to_string(),
            ));
        }
        compile_pattern(&self.settings_pattern)?;
        if self.shell.trim().is_empty() {
            return Err(SpotliteError::Config("shell must not be empty".to_string()));
        }
        if self.opener.trim().is_empty() {
            return Err(SpotliteError::Config("opener must not be empty".to_string()));
        }
        if self.clipboard_command.is_empty() {
            return Err(SpotliteError::Config(
                "clipboard_command must name a program".to_string(),
            ));
        }
        Ok(())
    }

    /// Application directories to scan, with defaults and `~` applied.
    #[must_use]
    pub fn resolved_application_dirs(&self) -> Vec<PathBuf> {
        if self.application_dirs.is_empty() {
            paths::application_dirs()
        } else {
            self.application_dirs.iter().map(|dir| expand_tilde(dir)).collect()
        }
    }

    /// Settings directories to scan, with defaults and `~` applied.
    #[must_use]
    pub fn resolved_settings_dirs(&self) -> Vec<PathBuf> {
        if self.settings_dirs.is_empty() {
            paths::settings_dirs()
        } else {
            self.settings_dirs.iter().map(|dir| expand_tilde(dir)).collect()
        }
    }

    /// The directory source behind a catalog provider, `None` for providers
    /// without one.
    fn catalog_source(&self, provider: &str) -> Option<Result<DesktopDirectorySource>> {
        match provider {
            APPLICATIONS => Some(DesktopDirectorySource::applications(
                self.resolved_application_dirs(),
            )),
            SETTINGS => Some(DesktopDirectorySource::settings(
                self.resolved_settings_dirs(),
                &self.settings_pattern,
            )),
            _ => None,
        }
    }

    /// Loads a catalog provider. A source that cannot be built leaves the
    /// provider empty, like a catalog that cannot be read.
    fn catalog_provider(
        &self,
        provider: &str,
        max_results: Option<usize>,
    ) -> Option<DesktopCatalogProvider> {
        let loaded = match self.catalog_source(provider)? {
            Ok(source) => DesktopCatalogProvider::load(provider, &source, max_results),
            Err(e) => {
                tracing::warn!(provider, error = %e, "catalog source unusable, provider disabled");
                DesktopCatalogProvider::new(provider, Vec::new(), max_results)
            }
        };
        Some(loaded)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Builds the session state: catalogs are loaded here, before the first
/// keystroke.
///
/// Providers are registered in tie-break order: settings panels, then
/// applications (capped at `max_app_results`), then mini-apps. The mini-app
/// registry holds the font preview app.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let mut registry = MiniAppRegistry::new();
    registry.register(FontPreviewApp::info(), Box::new(FontPreviewApp::default()));

    let settings = config.catalog_provider(SETTINGS, None);
    let applications = config.catalog_provider(APPLICATIONS, Some(config.max_app_results));

    let mut aggregator = Aggregator::new();
    for provider in settings.into_iter().chain(applications) {
        aggregator.register(Box::new(provider));
    }
    aggregator.register(Box::new(registry.provider()));

    tracing::info!(providers = ?aggregator.provider_names(), "launcher initialized");
    AppState::new(aggregator, registry)
}

/// Re-reads one catalog from disk and wraps it as a handoff event.
///
/// Returns `None` for a provider without a catalog, or when the catalog
/// cannot be read; the running provider then keeps its current snapshot.
#[must_use]
pub fn reload_catalog(config: &Config, provider: &str) -> Option<Event> {
    let listed = config
        .catalog_source(provider)?
        .and_then(|source| source.list_entries());
    match listed {
        Ok(entries) => {
            let entries: Arc<[CatalogEntry]> = entries.into();
            tracing::debug!(provider, count = entries.len(), "catalog reloaded");
            Some(Event::CatalogReloaded {
                provider: provider.to_string(),
                entries,
            })
        }
        Err(e) => {
            tracing::warn!(provider, error = %e, "catalog reload failed");
            None
        }
    }
}
