//! Drawer row activation and the log-level dialog

use sketch_cache::CacheKind;
use sketch_core::LogLevel;
use tracing::{debug, error, info, warn};

use crate::config::{save_config, ConfigKey};
use crate::event_bus::AppEvent;
use crate::menu::{click_action, MenuClick};
use crate::state::{AppState, LogLevelDialogState, UiMode};

use super::{UpdateAction, UpdateResult};

pub fn handle_open_drawer(state: &mut AppState) -> UpdateResult {
    if state.ui_mode == UiMode::Main {
        state.ui_mode = UiMode::Drawer;
        state.menu_view.normalize(&state.menu);
        state.post(AppEvent::DrawerOpened);
    }
    UpdateResult::none()
}

pub fn handle_close_drawer(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Main;
    UpdateResult::none()
}

/// Rows only react while the drawer is the active surface
pub fn handle_activate(state: &mut AppState, index: usize) -> UpdateResult {
    if state.ui_mode != UiMode::Drawer {
        debug!("Activate row {} ignored in {:?} mode", index, state.ui_mode);
        return UpdateResult::none();
    }
    let Some(entry) = state.menu.get(index) else {
        warn!("Activate: no menu row {}", index);
        state.set_error(format!("No menu row {}", index));
        return UpdateResult::none();
    };

    let click = click_action(entry);
    if entry.is_selectable() {
        state.menu_view.selected_index = index;
    }
    debug!("Activate row {} ({}): {:?}", index, entry.label(), click);

    match click {
        MenuClick::OpenPage(page) => {
            state.post(AppEvent::ChangePage { page });
            UpdateResult::none()
        }
        MenuClick::Toggle { key, close_drawer } => handle_toggle(state, key, close_drawer),
        MenuClick::ClearCache(cache) => handle_clear_cache(state, cache),
        MenuClick::PickLogLevel => {
            state.log_level_dialog = LogLevelDialogState::open(state.config.log_level());
            state.ui_mode = UiMode::LogLevelDialog;
            UpdateResult::none()
        }
        MenuClick::None => UpdateResult::none(),
    }
}

fn handle_toggle(state: &mut AppState, key: ConfigKey, close_drawer: bool) -> UpdateResult {
    let value = state.config.toggle(key);
    info!("Toggled {} -> {}", key, value);
    persist_config(state);

    if close_drawer {
        state.post(AppEvent::CloseDrawer);
    }

    UpdateResult::action(UpdateAction::ConfigChanged {
        key,
        config: state.config.clone(),
    })
}

/// Save on the update path so writes land in the order settings change
fn persist_config(state: &mut AppState) {
    if let Err(e) = save_config(&state.config_dir, &state.config) {
        error!("Failed to save config: {}", e);
        state.set_error(format!("Failed to save config: {}", e));
    }
}

fn handle_clear_cache(state: &mut AppState, cache: CacheKind) -> UpdateResult {
    if cache.clears_in_background() {
        state.set_status(format!("Cleaning {} cache...", cache));
    }
    UpdateResult::action(UpdateAction::ClearCache(cache))
}

/// A clear finished: close the drawer, refresh, then announce it
pub fn handle_cache_cleared(state: &mut AppState, cache: CacheKind) -> UpdateResult {
    info!("{} cache cleaned", cache);
    state.set_status(format!("{} cache cleaned", cache));
    state.post(AppEvent::CloseDrawer);
    state.post(AppEvent::CacheCleaned { cache });
    UpdateResult::action(UpdateAction::RefreshCacheStats)
}

pub fn handle_cache_clear_failed(state: &mut AppState, cache: CacheKind, error: &str) -> UpdateResult {
    warn!("Failed to clean {} cache: {}", cache, error);
    state.set_error(format!("Failed to clean {} cache: {}", cache, error));
    UpdateResult::none()
}

pub fn handle_log_level_picked(state: &mut AppState, position: usize) -> UpdateResult {
    if state.ui_mode != UiMode::LogLevelDialog {
        warn!("Log level picked while the dialog is closed");
        state.set_error("Log level dialog is not open");
        return UpdateResult::none();
    }
    let Some(level) = LogLevel::from_index(position) else {
        warn!("Log level dialog: no item {}", position);
        state.set_error(format!("No log level at position {}", position));
        return UpdateResult::none();
    };

    state.ui_mode = UiMode::Drawer;
    state.config.set_log_level(level);
    info!("Log level set to {}", level);
    persist_config(state);

    UpdateResult::action(UpdateAction::ConfigChanged {
        key: ConfigKey::LogLevel,
        config: state.config.clone(),
    })
}

pub fn handle_log_level_cancel(state: &mut AppState) -> UpdateResult {
    if state.ui_mode == UiMode::LogLevelDialog {
        state.ui_mode = UiMode::Drawer;
    }
    UpdateResult::none()
}
