//! The current list and its selection cursor.
//!
//! [`NavigationState`] holds one homogeneous list at a time: ranked results in
//! Search mode, or a mini-app's entries in Menu mode. The mode is not stored
//! separately; it follows from which list is held, so a Menu list without an
//! owning mini-app cannot be represented.
//!
//! The selection is `None` exactly when the list is empty. Every list
//! replacement moves it to the first row (or `None`), and navigation wraps in
//! both directions.

use super::modes::{Direction, Mode};
use crate::domain::{MenuEntry, ScoredItem};

/// The list currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentList {
    Search(Vec<ScoredItem>),
    Menu {
        app_id: String,
        entries: Vec<MenuEntry>,
    },
}

impl Default for CurrentList {
    fn default() -> Self {
        Self::Search(Vec::new())
    }
}

/// Mode, list and selection for one overlay session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    list: CurrentList,
    selected: Option<usize>,
}

impl NavigationState {
    /// Search mode, empty list, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self.list {
            CurrentList::Search(_) => Mode::Search,
            CurrentList::Menu { .. } => Mode::Menu,
        }
    }

    #[must_use]
    pub const fn list(&self) -> &CurrentList {
        &self.list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.list {
            CurrentList::Search(items) => items.len(),
            CurrentList::Menu { entries, .. } => entries.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Identifier of the open mini-app. `None` in Search mode.
    #[must_use]
    pub fn active_menu_provider(&self) -> Option<&str> {
        match &self.list {
            CurrentList::Menu { app_id, .. } => Some(app_id),
            CurrentList::Search(_) => None,
        }
    }

    /// Ranked item at `index`. Always `None` in Menu mode.
    #[must_use]
    pub fn search_item(&self, index: usize) -> Option<&ScoredItem> {
        match &self.list {
            CurrentList::Search(items) => items.get(index),
            CurrentList::Menu { .. } => None,
        }
    }

    /// Menu entry at `index`. Always `None` in Search mode.
    #[must_use]
    pub fn menu_entry(&self, index: usize) -> Option<&MenuEntry> {
        match &self.list {
            CurrentList::Menu { entries, .. } => entries.get(index),
            CurrentList::Search(_) => None,
        }
    }

    /// Adopts a fresh ranked list in Search mode.
    pub fn replace_search_list(&mut self, items: Vec<ScoredItem>) {
        self.list = CurrentList::Search(items);
        self.reset_selection();
    }

    /// Switches to Menu mode with `entries` from mini-app `app_id`.
    pub fn enter_menu(&mut self, app_id: impl Into<String>, entries: Vec<MenuEntry>) {
        self.list = CurrentList::Menu {
            app_id: app_id.into(),
            entries,
        };
        self.reset_selection();
    }

    /// Back to the state right after overlay open.
    pub fn reset(&mut self) {
        self.list = CurrentList::default();
        self.selected = None;
    }

    /// Moves the selection one step, wrapping at both ends.
    ///
    /// Returns `true` if the selected index changed. An empty list or a
    /// one-row list never changes.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let before = self.selected;
        match direction {
            Direction::Down => self.move_selection_down(),
            Direction::Up => self.move_selection_up(),
        }
        self.selected != before
    }

    /// Selects `index` directly.
    ///
    /// Out-of-range indices are ignored. Returns `true` if the selected index
    /// changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len() {
            tracing::debug!(index, len = self.len(), "ignoring out-of-range selection");
            return false;
        }
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        changed
    }

    fn reset_selection(&mut self) {
        self.selected = if self.is_empty() { None } else { Some(0) };
    }

    fn move_selection_down(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| (index + 1) % len));
    }

    fn move_selection_up(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuCommand;

    fn items(n: usize) -> Vec<ScoredItem> {
        (0..n)
            .map(|i| ScoredItem::launchable(format!("item {i}"), "", format!("cmd{i}"), 50))
            .collect()
    }

    fn entries(n: usize) -> Vec<MenuEntry> {
        (0..n)
            .map(|i| {
                let command = MenuCommand::CopyToClipboard(i.to_string());
                MenuEntry::new(format!("entry {i}"), "", command)
            })
            .collect()
    }

    #[test]
    fn starts_empty_in_search_mode() {
        let nav = NavigationState::new();
        assert_eq!(nav.mode(), Mode::Search);
        assert!(nav.is_empty());
        assert_eq!(nav.selected(), None);
        assert_eq!(nav.active_menu_provider(), None);
    }

    #[test]
    fn replacing_the_list_resets_selection() {
        let mut nav = NavigationState::new();
        nav.replace_search_list(items(3));
        nav.navigate(Direction::Down);
        assert_eq!(nav.selected(), Some(1));

        nav.replace_search_list(items(2));
        assert_eq!(nav.selected(), Some(0));

        nav.replace_search_list(Vec::new());
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut nav = NavigationState::new();
        nav.replace_search_list(items(3));

        assert!(nav.navigate(Direction::Up));
        assert_eq!(nav.selected(), Some(2));
        assert!(nav.navigate(Direction::Down));
        assert_eq!(nav.selected(), Some(0));
    }

    #[test]
    fn navigating_an_empty_list_is_a_no_op() {
        let mut nav = NavigationState::new();
        assert!(!nav.navigate(Direction::Down));
        assert!(!nav.navigate(Direction::Up));
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn single_row_never_reports_a_change() {
        let mut nav = NavigationState::new();
        nav.replace_search_list(items(1));
        assert!(!nav.navigate(Direction::Down));
        assert!(!nav.navigate(Direction::Up));
        assert_eq!(nav.selected(), Some(0));
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let mut nav = NavigationState::new();
        nav.replace_search_list(items(2));
        assert!(!nav.select(7));
        assert_eq!(nav.selected(), Some(0));
        assert!(nav.select(1));
        assert!(!nav.select(1));
    }

    #[test]
    fn menu_mode_tracks_its_mini_app() {
        let mut nav = NavigationState::new();
        nav.enter_menu("fonts", entries(2));
        assert_eq!(nav.mode(), Mode::Menu);
        assert_eq!(nav.active_menu_provider(), Some("fonts"));
        assert!(nav.menu_entry(1).is_some());
        assert!(nav.search_item(0).is_none());

        nav.reset();
        assert_eq!(nav, NavigationState::new());
    }

    #[test]
    fn empty_menu_has_no_selection() {
        let mut nav = NavigationState::new();
        nav.enter_menu("fonts", Vec::new());
        assert_eq!(nav.mode(), Mode::Menu);
        assert_eq!(nav.selected(), None);
    }
}
