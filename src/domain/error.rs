//! Error types for the launcher.
//!
//! The ranking engine and the navigation state machine never fail. Errors only
//! come out of the I/O collaborators around them (catalog loading, process
//! spawning, clipboard access, configuration loading), and callers are expected
//! to log and degrade rather than abort a search.

use thiserror::Error;

/// The main error type for launcher operations.
#[derive(Debug, Error)]
pub enum SpotliteError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    ///
    /// The string describes which value was rejected and why.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed as TOML.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An item catalog could not be loaded.
    ///
    /// Providers turn this into an empty result set; it never reaches the
    /// aggregator.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A launch or URL-open request could not be handed to the system.
    #[error("Launch error: {0}")]
    Launch(String),

    /// Clipboard helper could not be spawned or fed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// A specialized `Result` type for launcher operations.
pub type Result<T> = std::result::Result<T, SpotliteError>;
