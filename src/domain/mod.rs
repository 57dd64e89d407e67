//! Domain layer: the item types every other layer exchanges.
//!
//! Nothing in here performs I/O. Providers produce [`ScoredItem`]s, mini-apps
//! produce [`MenuEntry`]s, catalog sources produce [`CatalogEntry`]s, and the
//! navigation state machine holds exactly one homogeneous list of either
//! scored items or menu entries at a time.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`item`]: Ranked items, menu entries and their commands
//! - [`catalog`]: Raw catalog records as read from desktop entries

pub mod catalog;
pub mod error;
pub mod item;

pub use catalog::CatalogEntry;
pub use error::{Result, SpotliteError};
pub use item::{ItemKind, MenuCommand, MenuEntry, ScoredItem, StyleHint};
