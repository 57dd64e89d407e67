//! Infrastructure layer: everything that touches the filesystem, the
//! environment or other processes.
//!
//! - [`paths`]: XDG directory resolution and tilde expansion
//! - [`desktop_entry`]: desktop-entry parsing and the directory-backed catalog source
//! - [`launcher`]: process spawning, URL opening and clipboard access

pub mod desktop_entry;
pub mod launcher;
pub mod paths;

pub use desktop_entry::{compile_pattern, parse_desktop_entry, DesktopDirectorySource};
pub use launcher::{expand_field_codes, fallback_url, Launcher, ShellLauncher};
pub use paths::{application_dirs, data_dir, expand_tilde, settings_dirs};
