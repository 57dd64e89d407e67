//! Ranked result items and mini-app menu entries.
//!
//! A [`ScoredItem`] is what the aggregator ranks and what the search list is
//! made of. Its [`ItemKind`] carries the payload that decides what activation
//! does: launch a command, open a mini-app menu, or run the fallback action.
//!
//! A [`MenuEntry`] lives in a mini-app's drill-down list. Entries are never
//! ranked; they keep the order the mini-app returned them in. What an entry does
//! when activated is described by a [`MenuCommand`] value that the runtime
//! interprets, so an entry owns everything it needs and borrows nothing from
//! the mini-app that produced it.

/// What activating a ranked item does, together with the data it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// Launch an external command. The command is kept exactly as the catalog
    /// supplied it; field codes are expanded by the launcher, not here.
    Launchable { command: String },

    /// Drill into the mini-app registered under `app_id`.
    SubAppEntry { app_id: String },

    /// The trailing default action, run with the current query text.
    FallbackAction,
}

/// A candidate item produced by a provider, or the synthetic fallback item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredItem {
    pub display_name: String,
    pub description: String,
    pub kind: ItemKind,
    /// Icon name or path from the catalog, passed through to the row.
    pub icon: Option<String>,
    /// Match quality in `0..=100`. Always 0 for the fallback item, which is
    /// never sorted.
    pub score: u8,
}

impl ScoredItem {
    #[must_use]
    pub fn launchable(
        display_name: impl Into<String>,
        description: impl Into<String>,
        command: impl Into<String>,
        score: u8,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
            kind: ItemKind::Launchable {
                command: command.into(),
            },
            icon: None,
            score: score.min(100),
        }
    }

    #[must_use]
    pub fn sub_app(
        display_name: impl Into<String>,
        description: impl Into<String>,
        app_id: impl Into<String>,
        score: u8,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
            kind: ItemKind::SubAppEntry {
                app_id: app_id.into(),
            },
            icon: None,
            score: score.min(100),
        }
    }

    /// Builds the fallback item for `query`, labelled `"Search <query>"`.
    #[must_use]
    pub fn fallback(query: &str) -> Self {
        Self {
            display_name: format!("Search {query}"),
            description: String::new(),
            kind: ItemKind::FallbackAction,
            icon: None,
            score: 0,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.kind, ItemKind::FallbackAction)
    }
}

/// Presentation hint attached to a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleHint {
    /// Render the entry title in this font family.
    Font { family: String },
}

/// Side effect requested by activating a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Put `text` on the system clipboard.
    CopyToClipboard(String),
}

/// One entry of a mini-app's drill-down list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: String,
    pub description: String,
    pub command: MenuCommand,
    pub style: Option<StyleHint>,
}

impl MenuEntry {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        command: MenuCommand,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            command,
            style: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleHint) -> Self {
        self.style = Some(style);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_label_uses_literal_query() {
        let item = ScoredItem::fallback("fi");
        assert_eq!(item.display_name, "Search fi");
        assert!(item.is_fallback());
        assert_eq!(item.score, 0);
    }

    #[test]
    fn constructors_clamp_score() {
        let item = ScoredItem::launchable("A", "", "a", 250);
        assert_eq!(item.score, 100);
        assert_eq!(item.icon, None);
    }
}
