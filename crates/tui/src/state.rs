//! View navigation and selection state

use crate::theme::ThemeType;
use std::collections::HashMap;

/// Top-level views, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Library,
    Search,
    Statistics,
    Help,
}

impl View {
    pub const ALL: [View; 4] = [View::Library, View::Search, View::Statistics, View::Help];

    pub fn title(&self) -> &'static str {
        match self {
            View::Library => "Library",
            View::Search => "Search",
            View::Statistics => "Statistics",
            View::Help => "Help",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Navigation state shared by every view
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub should_quit: bool,
    /// Cursor in the current view's list
    pub selected_item: usize,
    /// Status bar message
    pub status_message: Option<String>,
    pub theme: ThemeType,
    item_counts: HashMap<View, usize>,
    view_selections: HashMap<View, usize>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches view, keeping each view's cursor position
    pub fn set_view(&mut self, view: View) {
        self.view_selections.insert(self.view, self.selected_item);
        self.view = view;
        self.selected_item = self.view_selections.get(&view).copied().unwrap_or(0);
        self.clamp_selection();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Records how many rows `view` currently lists, pulling the cursor back in range
    pub fn set_item_count(&mut self, view: View, count: usize) {
        self.item_counts.insert(view, count);
        if view == self.view {
            self.clamp_selection();
        } else if let Some(selection) = self.view_selections.get_mut(&view) {
            *selection = (*selection).min(count.saturating_sub(1));
        }
    }

    pub fn item_count(&self, view: View) -> usize {
        self.item_counts.get(&view).copied().unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let last = self.item_count(self.view).saturating_sub(1);
        if self.selected_item < last {
            self.selected_item += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_item = self.selected_item.saturating_sub(1);
    }

    pub fn reset_selection(&mut self) {
        self.selected_item = 0;
    }

    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
    }

    fn clamp_selection(&mut self) {
        let last = self.item_count(self.view).saturating_sub(1);
        self.selected_item = self.selected_item.min(last);
    }
}
