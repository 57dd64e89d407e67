//! Desktop-entry files as a catalog source.
//!
//! Only the `[Desktop Entry]` group is read. Within it the first `Name` and the
//! first `Comment` win, `Exec` and `Icon` are taken as written, and the
//! `Hidden` / `NoDisplay` flags decide visibility. Localized keys such as
//! `Name[de]` are ignored.

use crate::domain::{CatalogEntry, Result, SpotliteError};
use crate::providers::CatalogSource;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// Key/value content of one desktop-entry file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub exec: Option<String>,
    pub icon: Option<String>,
    pub hidden: bool,
    pub no_display: bool,
}

impl DesktopEntry {
    /// Converts to a catalog record if the entry is launchable and visible.
    ///
    /// `Hidden=true` always hides the entry. `NoDisplay=true` hides it only
    /// when `honour_no_display` is set; settings panels are commonly flagged
    /// `NoDisplay` yet should stay searchable.
    #[must_use]
    pub fn into_catalog_entry(
        self,
        source: &Path,
        honour_no_display: bool,
    ) -> Option<CatalogEntry> {
        if self.hidden || (honour_no_display && self.no_display) {
            return None;
        }

        let name = self.name.filter(|n| !n.is_empty())?;
        let exec = self.exec.filter(|e| !e.is_empty())?;

        Some(CatalogEntry {
            name,
            description: self.comment.unwrap_or_default(),
            exec,
            icon: self.icon,
            source: source.to_path_buf(),
        })
    }
}

/// Parses the `[Desktop Entry]` group of a desktop-entry file.
#[must_use]
pub fn parse_desktop_entry(contents: &str) -> DesktopEntry {
    let mut entry = DesktopEntry::default();
    let mut in_entry_group = false;

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(group) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_entry_group = group == DESKTOP_ENTRY_GROUP;
            continue;
        }

        if !in_entry_group {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "Name" if entry.name.is_none() => entry.name = Some(value.to_string()),
            "Comment" if entry.comment.is_none() => entry.comment = Some(value.to_string()),
            "Exec" => entry.exec = Some(value.to_string()),
            "Icon" => entry.icon = Some(value.to_string()),
            "Hidden" => entry.hidden = value == "true",
            "NoDisplay" => entry.no_display = value == "true",
            _ => {}
        }
    }

    entry
}

/// Compiles a file-name glob such as `gnome-*-panel.desktop`.
///
/// # Errors
///
/// Returns [`SpotliteError::Config`] if `pattern` is not a valid glob.
pub fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern)
        .map_err(|e| SpotliteError::Config(format!("invalid file pattern '{pattern}': {e}")))
}

/// Catalog source reading desktop entries from a list of directories.
///
/// Directories are visited in order; files within a directory in file-name
/// order. Missing directories are skipped.
#[derive(Debug, Clone)]
pub struct DesktopDirectorySource {
    dirs: Vec<PathBuf>,
    pattern: Pattern,
    honour_no_display: bool,
}

impl DesktopDirectorySource {
    /// # Errors
    ///
    /// Returns [`SpotliteError::Config`] if `pattern` is not a valid glob.
    pub fn new(dirs: Vec<PathBuf>, pattern: &str, honour_no_display: bool) -> Result<Self> {
        Ok(Self {
            dirs,
            pattern: compile_pattern(pattern)?,
            honour_no_display,
        })
    }

    /// Installed applications: every `*.desktop` file, `NoDisplay` honoured.
    ///
    /// # Errors
    ///
    /// None for the fixed `*.desktop` glob; the `Result` mirrors [`Self::new`].
    pub fn applications(dirs: Vec<PathBuf>) -> Result<Self> {
        Self::new(dirs, "*.desktop", true)
    }

    /// Settings panels whose file name matches the glob `pattern`, `NoDisplay`
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SpotliteError::Config`] if `pattern` is not a valid glob.
    pub fn settings(dirs: Vec<PathBuf>, pattern: &str) -> Result<Self> {
        Self::new(dirs, pattern, false)
    }

    fn read_dir_sorted(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| self.pattern.matches(name))
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

impl CatalogSource for DesktopDirectorySource {
    fn list_entries(&self) -> Result<Vec<CatalogEntry>> {
        let _span = tracing::debug_span!(
            "list_desktop_entries",
            dirs = self.dirs.len(),
            pattern = %self.pattern
        )
        .entered();

        let mut entries = Vec::new();
        let mut readable = 0usize;
        let mut failures = Vec::new();

        for dir in self.dirs.iter().filter(|dir| dir.is_dir()) {
            let files = match self.read_dir_sorted(dir) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!(dir = ?dir, error = %e, "cannot read descriptor directory");
                    failures.push(format!("{}: {e}", dir.display()));
                    continue;
                }
            };
            readable += 1;

            for path in files {
                let contents = match fs::read_to_string(&path) {
                    Ok(contents) => contents,
                    Err(e) => {
                        tracing::debug!(path = ?path, error = %e, "skipping unreadable descriptor");
                        continue;
                    }
                };

                let entry = parse_desktop_entry(&contents);
                if let Some(entry) = entry.into_catalog_entry(&path, self.honour_no_display) {
                    entries.push(entry);
                } else {
                    tracing::trace!(path = ?path, "descriptor hidden or incomplete");
                }
            }
        }

        if readable == 0 && !failures.is_empty() {
            return Err(SpotliteError::Catalog(failures.join("; ")));
        }

        tracing::debug!(count = entries.len(), "desktop entries listed");
        Ok(entries)
    }
}
