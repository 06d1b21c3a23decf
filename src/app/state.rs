//! Application state management
//!
//! All session state lives here: which screen is showing, the explorer's
//! filter/sort parameters, the active category tab, and the detail selection.
//! None of it survives past the process; the catalog itself is immutable.

use crate::catalog::{filter_and_sort, CategoryDescriptor, ModRecord, ModStore, SortKey};
use crate::status::ServerStatus;
use chrono::{DateTime, Local};

/// Current screen in the TUI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Dashboard,
    Explorer,
    Categories,
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// The detail view: closed, or open on one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Closed,
    Open(i64),
}

impl Selection {
    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open(_))
    }

    pub fn record_id(&self) -> Option<i64> {
        match self {
            Selection::Open(id) => Some(*id),
            Selection::Closed => None,
        }
    }
}

/// One slideshow step with wraparound in either direction. Fewer than two
/// images never moves the position.
pub fn step_media(index: usize, count: usize, forward: bool) -> usize {
    if count < 2 {
        return index;
    }
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

/// Application state for the TUI
#[derive(Debug)]
pub struct AppState {
    /// Current screen
    pub current_screen: Screen,

    /// Previous screen (for back navigation)
    pub previous_screen: Option<Screen>,

    /// Input mode (for the search bar)
    pub input_mode: InputMode,

    // Explorer filter/sort parameters
    pub search_query: String,
    /// None = all categories
    pub category_filter: Option<String>,
    /// None = all tags
    pub tag_filter: Option<String>,
    /// None = leave filtered order alone
    pub sort_key: Option<SortKey>,

    /// Ids of the currently visible explorer results, in display order
    pub visible: Vec<i64>,

    /// Cursor position in the explorer result list
    pub selected_index: usize,

    /// Active category tab (index into the descriptor list)
    pub active_category_index: usize,

    /// Cursor position within the active category bucket
    pub category_cursor: usize,

    /// Detail view state
    pub selection: Selection,

    /// Current image in the detail slideshow
    pub media_index: usize,

    /// Latest server status snapshot
    pub server_status: ServerStatus,

    /// When the last successful poll landed
    pub status_checked_at: Option<DateTime<Local>>,

    /// Status message shown in the footer
    pub status_message: Option<String>,

    /// Show help overlay
    pub show_help: bool,

    /// Should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(show_help: bool, sort_key: Option<SortKey>) -> Self {
        Self {
            current_screen: Screen::default(),
            previous_screen: None,
            input_mode: InputMode::default(),
            search_query: String::new(),
            category_filter: None,
            tag_filter: None,
            sort_key,
            visible: Vec::new(),
            selected_index: 0,
            active_category_index: 0,
            category_cursor: 0,
            selection: Selection::Closed,
            media_index: 0,
            server_status: ServerStatus::default(),
            status_checked_at: None,
            status_message: None,
            show_help,
            should_quit: false,
        }
    }

    /// Navigate to a screen
    pub fn goto(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
        // Clear status message when navigating to avoid stale messages
        self.status_message = None;
    }

    /// Go back to the previous screen
    pub fn go_back(&mut self) {
        if let Some(prev) = self.previous_screen.take() {
            self.current_screen = prev;
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Recompute the visible explorer results from the current parameters.
    pub fn refresh_visible(&mut self, store: &ModStore) {
        self.visible = filter_and_sort(
            store.records(),
            &self.search_query,
            self.category_filter.as_deref(),
            self.tag_filter.as_deref(),
            self.sort_key,
        )
        .iter()
        .map(|r| r.id)
        .collect();

        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    /// The record under the explorer cursor, if any.
    pub fn record_under_cursor<'a>(&self, store: &'a ModStore) -> Option<&'a ModRecord> {
        self.visible
            .get(self.selected_index)
            .and_then(|id| store.get(*id))
    }

    /// Open the detail view on a record; re-selecting while open just
    /// switches records. Resets the slideshow position.
    pub fn open_detail(&mut self, id: i64) {
        self.selection = Selection::Open(id);
        self.media_index = 0;
    }

    /// Close the detail view.
    pub fn close_detail(&mut self) {
        self.selection = Selection::Closed;
        self.media_index = 0;
    }

    /// The currently inspected record. A selection pointing at an id the
    /// store no longer has is treated as closed.
    pub fn selected_record<'a>(&self, store: &'a ModStore) -> Option<&'a ModRecord> {
        self.selection.record_id().and_then(|id| store.get(id))
    }

    /// Switch the active category tab. Always closes any open detail view so
    /// no stale selection from the previous tab persists.
    pub fn set_active_category(&mut self, index: usize, descriptors: &[CategoryDescriptor]) {
        if index < descriptors.len() {
            self.active_category_index = index;
            self.category_cursor = 0;
            self.close_detail();
        }
    }

    /// Toggle the explorer tag filter: picking the active tag again clears it.
    pub fn toggle_tag_filter(&mut self, tag: &str) {
        if self.tag_filter.as_deref() == Some(tag) {
            self.tag_filter = None;
        } else {
            self.tag_filter = Some(tag.to_string());
        }
    }

    /// "Showing all N mods" vs "Showing X of N mods" for the explorer bar.
    pub fn results_label(&self, total: usize) -> String {
        let unfiltered = self.search_query.trim().is_empty()
            && self.category_filter.is_none()
            && self.tag_filter.is_none();
        if unfiltered && self.visible.len() == total {
            format!("Showing all {} mods", total)
        } else {
            format!("Showing {} of {} mods", self.visible.len(), total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_descriptors, ModStore};

    fn sample_store() -> ModStore {
        ModStore::from_json(
            r#"[
                {"id": 1, "name": "Sodium", "category": "optimizers",
                 "tag": "performance", "description": "Rendering engine"},
                {"id": 3, "name": "Waystones", "category": "casual",
                 "tag": "travel", "description": "Teleport network"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_selection_transitions() {
        let mut state = AppState::new(false, Some(SortKey::Name));
        assert_eq!(state.selection, Selection::Closed);

        state.open_detail(1);
        assert_eq!(state.selection, Selection::Open(1));

        // Selecting another record while open switches directly.
        state.open_detail(3);
        assert_eq!(state.selection, Selection::Open(3));

        state.close_detail();
        assert_eq!(state.selection, Selection::Closed);
    }

    #[test]
    fn test_category_switch_clears_selection() {
        let descriptors = default_descriptors();
        let mut state = AppState::new(false, Some(SortKey::Name));
        state.open_detail(1);
        state.category_cursor = 2;

        state.set_active_category(3, &descriptors);
        assert_eq!(state.selection, Selection::Closed);
        assert_eq!(state.active_category_index, 3);
        assert_eq!(state.category_cursor, 0);
    }

    #[test]
    fn test_out_of_range_category_is_ignored() {
        let descriptors = default_descriptors();
        let mut state = AppState::new(false, Some(SortKey::Name));
        state.set_active_category(descriptors.len(), &descriptors);
        assert_eq!(state.active_category_index, 0);
    }

    #[test]
    fn test_stale_selection_reads_as_closed() {
        let store = sample_store();
        let mut state = AppState::new(false, Some(SortKey::Name));
        state.open_detail(99);
        assert!(state.selected_record(&store).is_none());
    }

    #[test]
    fn test_refresh_visible_clamps_cursor() {
        let store = sample_store();
        let mut state = AppState::new(false, Some(SortKey::Name));
        state.refresh_visible(&store);
        assert_eq!(state.visible.len(), 2);

        state.selected_index = 1;
        state.search_query = "teleport".to_string();
        state.refresh_visible(&store);
        assert_eq!(state.visible, vec![3]);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_media_step_wraps_both_directions() {
        assert_eq!(step_media(2, 3, true), 0);
        assert_eq!(step_media(0, 3, false), 2);
        assert_eq!(step_media(0, 3, true), 1);
        assert_eq!(step_media(1, 3, false), 0);
    }

    #[test]
    fn test_media_step_ignores_tiny_galleries() {
        assert_eq!(step_media(0, 0, true), 0);
        assert_eq!(step_media(0, 0, false), 0);
        assert_eq!(step_media(0, 1, true), 0);
        assert_eq!(step_media(0, 1, false), 0);
    }

    #[test]
    fn test_tag_filter_toggles_off() {
        let mut state = AppState::new(false, Some(SortKey::Name));
        state.toggle_tag_filter("travel");
        assert_eq!(state.tag_filter.as_deref(), Some("travel"));
        state.toggle_tag_filter("travel");
        assert_eq!(state.tag_filter, None);
    }

    #[test]
    fn test_results_label() {
        let store = sample_store();
        let mut state = AppState::new(false, Some(SortKey::Name));
        state.refresh_visible(&store);
        assert_eq!(state.results_label(store.len()), "Showing all 2 mods");

        state.search_query = "engine".to_string();
        state.refresh_visible(&store);
        assert_eq!(state.results_label(store.len()), "Showing 1 of 2 mods");
    }
}
