//! Application state (Model in TEA pattern)

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use sketch_cache::{CacheKind, CacheStats};
use sketch_core::LogLevel;

use crate::config::AppConfig;
use crate::event_bus::AppEvent;
use crate::menu::{build_menu, menu_rows, InfoContext, MenuEntry, MenuRow, Page};

/// How many bus events the main page keeps for display
pub const EVENT_LOG_CAPACITY: usize = 50;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Main page only
    #[default]
    Main,
    /// Drawer open over the main page
    Drawer,
    /// Log-level picker open over the drawer
    LogLevelDialog,
}

/// Selection and scroll position of the drawer list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuViewState {
    pub selected_index: usize,
    /// First visible row, maintained by the renderer
    pub scroll_offset: usize,
}

impl MenuViewState {
    /// Put the selection on a selectable row, searching forward from the
    /// current one.
    pub fn normalize(&mut self, menu: &[MenuEntry]) {
        if menu.get(self.selected_index).is_some_and(MenuEntry::is_selectable) {
            return;
        }
        if let Some(idx) = first_selectable(menu) {
            self.selected_index = menu
                .iter()
                .enumerate()
                .skip(self.selected_index)
                .find(|(_, e)| e.is_selectable())
                .map(|(i, _)| i)
                .unwrap_or(idx);
        }
    }

    pub fn select_next(&mut self, menu: &[MenuEntry]) {
        let len = menu.len();
        if len == 0 {
            return;
        }
        for step in 1..=len {
            let idx = (self.selected_index + step) % len;
            if menu[idx].is_selectable() {
                self.selected_index = idx;
                return;
            }
        }
    }

    pub fn select_previous(&mut self, menu: &[MenuEntry]) {
        let len = menu.len();
        if len == 0 {
            return;
        }
        for step in 1..=len {
            let idx = (self.selected_index + len - step % len) % len;
            if menu[idx].is_selectable() {
                self.selected_index = idx;
                return;
            }
        }
    }

    pub fn select_first(&mut self, menu: &[MenuEntry]) {
        if let Some(idx) = first_selectable(menu) {
            self.selected_index = idx;
        }
    }

    pub fn select_last(&mut self, menu: &[MenuEntry]) {
        if let Some(idx) = menu.iter().rposition(MenuEntry::is_selectable) {
            self.selected_index = idx;
        }
    }

    /// Adjust `scroll_offset` so the selection is inside a window of
    /// `visible_rows` rows
    pub fn ensure_visible(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected_index + 1 - visible_rows;
        }
    }
}

fn first_selectable(menu: &[MenuEntry]) -> Option<usize> {
    menu.iter().position(MenuEntry::is_selectable)
}

/// State of the "Switch Log Level" dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogLevelDialogState {
    pub selected: usize,
}

impl LogLevelDialogState {
    pub const TITLE: &'static str = "Switch Log Level";
    pub const CANCEL_LABEL: &'static str = "Cancel";
    pub const CURRENT_MARKER: &'static str = " (*)";

    pub fn open(current: LogLevel) -> Self {
        Self {
            selected: current.index(),
        }
    }

    /// Level labels, the current level marked with `" (*)"`
    pub fn items(current: LogLevel) -> Vec<String> {
        LogLevel::ALL
            .iter()
            .map(|level| {
                if *level == current {
                    format!("{}{}", level.label(), Self::CURRENT_MARKER)
                } else {
                    level.label().to_string()
                }
            })
            .collect()
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % LogLevel::ALL.len();
    }

    pub fn previous(&mut self) {
        let len = LogLevel::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }
}

/// One-line feedback shown on the main page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,

    /// Persistent settings
    pub config: AppConfig,
    /// Where `config.toml` is saved
    pub config_dir: PathBuf,

    /// Drawer entries, built once
    pub menu: Vec<MenuEntry>,
    pub menu_view: MenuViewState,

    /// Last stats per cache; rows show a placeholder until loaded
    pub cache_stats: HashMap<CacheKind, CacheStats>,

    pub log_level_dialog: LogLevelDialogState,

    // Main page
    pub current_page: Page,
    pub background_url: Option<String>,
    pub status: Option<StatusMessage>,
    /// Most recent bus events, newest last
    pub event_log: VecDeque<AppEvent>,

    /// Events to publish once the current update cycle finishes
    pub pending_events: Vec<AppEvent>,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, config_dir: PathBuf) -> Self {
        let menu = build_menu();
        let mut menu_view = MenuViewState::default();
        menu_view.normalize(&menu);

        Self {
            ui_mode: UiMode::Main,
            config,
            config_dir,
            menu,
            menu_view,
            cache_stats: HashMap::new(),
            log_level_dialog: LogLevelDialogState::default(),
            current_page: Page::default(),
            background_url: None,
            status: None,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            pending_events: Vec::new(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Drawer is visible (possibly under the log-level dialog)
    pub fn is_drawer_open(&self) -> bool {
        matches!(self.ui_mode, UiMode::Drawer | UiMode::LogLevelDialog)
    }

    /// Queue an event for the bus
    pub fn post(&mut self, event: AppEvent) {
        self.pending_events.push(event);
    }

    pub fn take_pending_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn record_event(&mut self, event: AppEvent) {
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(event);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn update_cache_stats(&mut self, stats: Vec<CacheStats>) {
        for entry in stats {
            self.cache_stats.insert(entry.kind, entry);
        }
    }

    pub fn info_context(&self) -> InfoContext<'_> {
        InfoContext {
            config: &self.config,
            cache_stats: &self.cache_stats,
        }
    }

    /// Display rows for the whole drawer
    pub fn menu_rows(&self) -> Vec<MenuRow> {
        menu_rows(&self.menu, &self.info_context())
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.menu.get(self.menu_view.selected_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> Vec<MenuEntry> {
        vec![
            MenuEntry::title("A"),
            MenuEntry::Page(Page::Unsplash),
            MenuEntry::Page(Page::About),
            MenuEntry::title("B"),
            MenuEntry::Page(Page::OtherTest),
        ]
    }

    #[test]
    fn test_normalize_skips_leading_title() {
        let menu = sample_menu();
        let mut view = MenuViewState::default();
        view.normalize(&menu);
        assert_eq!(view.selected_index, 1);

        view.selected_index = 3;
        view.normalize(&menu);
        assert_eq!(view.selected_index, 4);
    }

    #[test]
    fn test_select_next_skips_titles_and_wraps() {
        let menu = sample_menu();
        let mut view = MenuViewState {
            selected_index: 2,
            scroll_offset: 0,
        };
        view.select_next(&menu);
        assert_eq!(view.selected_index, 4);
        view.select_next(&menu);
        assert_eq!(view.selected_index, 1);
    }

    #[test]
    fn test_select_previous_skips_titles_and_wraps() {
        let menu = sample_menu();
        let mut view = MenuViewState {
            selected_index: 4,
            scroll_offset: 0,
        };
        view.select_previous(&menu);
        assert_eq!(view.selected_index, 2);
        view.select_previous(&menu);
        assert_eq!(view.selected_index, 1);
        view.select_previous(&menu);
        assert_eq!(view.selected_index, 4);
    }

    #[test]
    fn test_select_first_and_last() {
        let menu = sample_menu();
        let mut view = MenuViewState::default();
        view.select_last(&menu);
        assert_eq!(view.selected_index, 4);
        view.select_first(&menu);
        assert_eq!(view.selected_index, 1);
    }

    #[test]
    fn test_ensure_visible() {
        let mut view = MenuViewState {
            selected_index: 12,
            scroll_offset: 0,
        };
        view.ensure_visible(10);
        assert_eq!(view.scroll_offset, 3);

        view.selected_index = 1;
        view.ensure_visible(10);
        assert_eq!(view.scroll_offset, 1);
    }

    #[test]
    fn test_dialog_items_mark_current() {
        let items = LogLevelDialogState::items(LogLevel::Warning);
        assert_eq!(
            items,
            vec!["VERBOSE", "DEBUG", "INFO", "WARNING (*)", "ERROR", "NONE"]
        );
    }

    #[test]
    fn test_dialog_navigation_wraps() {
        let mut dialog = LogLevelDialogState::open(LogLevel::None);
        assert_eq!(dialog.selected, 5);
        dialog.next();
        assert_eq!(dialog.selected, 0);
        dialog.previous();
        assert_eq!(dialog.selected, 5);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut state = AppState::new(AppConfig::new(), PathBuf::from("."));
        for _ in 0..(EVENT_LOG_CAPACITY + 5) {
            state.record_event(AppEvent::DrawerOpened);
        }
        state.record_event(AppEvent::CloseDrawer);
        assert_eq!(state.event_log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(state.event_log.back(), Some(&AppEvent::CloseDrawer));
    }

    #[test]
    fn test_new_state_selects_first_page() {
        let state = AppState::new(AppConfig::new(), PathBuf::from("."));
        assert_eq!(state.menu_view.selected_index, 1);
        assert_eq!(state.selected_entry(), Some(&MenuEntry::Page(Page::Unsplash)));
        assert!(!state.is_drawer_open());
    }
}
