//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::{bus, keys::handle_key, menu, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.should_quit = true;
            UpdateResult::none()
        }

        Message::Tick => UpdateResult::none(),

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        // ─────────────────────────────────────────────────────────
        // Drawer Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenDrawer => menu::handle_open_drawer(state),
        Message::CloseDrawer => menu::handle_close_drawer(state),
        Message::ToggleDrawer => {
            if state.is_drawer_open() {
                menu::handle_close_drawer(state)
            } else {
                menu::handle_open_drawer(state)
            }
        }

        Message::SelectNext => {
            state.menu_view.select_next(&state.menu);
            UpdateResult::none()
        }
        Message::SelectPrevious => {
            state.menu_view.select_previous(&state.menu);
            UpdateResult::none()
        }
        Message::SelectFirst => {
            state.menu_view.select_first(&state.menu);
            UpdateResult::none()
        }
        Message::SelectLast => {
            state.menu_view.select_last(&state.menu);
            UpdateResult::none()
        }

        Message::ActivateSelected => {
            UpdateResult::message(Message::ActivateIndex(state.menu_view.selected_index))
        }
        Message::ActivateIndex(index) => menu::handle_activate(state, index),

        // Consumed by the runner before update
        Message::RequestMenuSnapshot => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Log Level Dialog Messages
        // ─────────────────────────────────────────────────────────
        Message::LogLevelDialogNext => {
            if state.ui_mode == UiMode::LogLevelDialog {
                state.log_level_dialog.next();
            }
            UpdateResult::none()
        }
        Message::LogLevelDialogPrevious => {
            if state.ui_mode == UiMode::LogLevelDialog {
                state.log_level_dialog.previous();
            }
            UpdateResult::none()
        }
        Message::LogLevelDialogConfirm => {
            UpdateResult::message(Message::LogLevelPicked(state.log_level_dialog.selected))
        }
        Message::LogLevelPicked(position) => menu::handle_log_level_picked(state, position),
        Message::LogLevelDialogCancel => menu::handle_log_level_cancel(state),

        // ─────────────────────────────────────────────────────────
        // Cache Messages
        // ─────────────────────────────────────────────────────────
        Message::CacheStatsLoaded(stats) => {
            state.update_cache_stats(stats);
            UpdateResult::none()
        }
        Message::CacheCleared(cache) => menu::handle_cache_cleared(state, cache),
        Message::CacheClearFailed { cache, error } => {
            menu::handle_cache_clear_failed(state, cache, &error)
        }

        // ─────────────────────────────────────────────────────────
        // Main Page / Bus Messages
        // ─────────────────────────────────────────────────────────
        Message::SetBackground(url) => bus::handle_set_background(state, &url),
        Message::Bus(event) => bus::handle_bus_event(state, event),
    }
}
