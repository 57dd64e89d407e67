//! Directory resolution following the XDG base directory conventions.

use std::env;
use std::path::PathBuf;

/// Directory for the launcher's own files (trace output).
///
/// The platform data dir (`$XDG_DATA_HOME` or `~/.local/share`) joined with
/// `spotlite`, else a `spotlite` directory under the system temp dir.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("spotlite")
}

/// Default config file location: `$XDG_CONFIG_HOME/spotlite/config.toml`,
/// else `~/.config/spotlite/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("spotlite").join("config.toml"))
}

/// Directories searched for application desktop entries, user first.
///
/// The user data dir comes first, then every `$XDG_DATA_DIRS` entry (or
/// `/usr/local/share` and `/usr/share` when unset), each with `applications`
/// appended. Duplicates are dropped; existence is not checked here.
#[must_use]
pub fn application_dirs() -> Vec<PathBuf> {
    let mut bases: Vec<PathBuf> = dirs::data_dir().into_iter().collect();

    match env::var("XDG_DATA_DIRS") {
        Ok(dirs) if !dirs.is_empty() => {
            bases.extend(dirs.split(':').filter(|d| !d.is_empty()).map(PathBuf::from));
        }
        _ => {
            bases.push(PathBuf::from("/usr/local/share"));
            bases.push(PathBuf::from("/usr/share"));
        }
    }

    let mut dirs: Vec<PathBuf> = Vec::with_capacity(bases.len());
    for dir in bases.into_iter().map(|base| base.join("applications")) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Directories searched for settings panel entries.
#[must_use]
pub fn settings_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/share/applications"),
        PathBuf::from("/usr/local/share/applications"),
    ]
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and any path when no home directory can be
/// determined, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
