//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Main => handle_key_main(key),
        UiMode::Drawer => handle_key_drawer(key),
        UiMode::LogLevelDialog => handle_key_log_level_dialog(key),
    }
}

fn handle_key_main(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('m') | InputKey::Tab => Some(Message::OpenDrawer),
        _ => None,
    }
}

fn handle_key_drawer(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('j') | InputKey::Down | InputKey::Tab => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up | InputKey::BackTab => Some(Message::SelectPrevious),
        InputKey::Char('g') | InputKey::Home => Some(Message::SelectFirst),
        InputKey::Char('G') | InputKey::End => Some(Message::SelectLast),

        InputKey::Enter | InputKey::Char(' ') => Some(Message::ActivateSelected),

        InputKey::Esc | InputKey::Char('m') => Some(Message::CloseDrawer),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_log_level_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('j') | InputKey::Down => Some(Message::LogLevelDialogNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::LogLevelDialogPrevious),
        InputKey::Enter | InputKey::Char(' ') => Some(Message::LogLevelDialogConfirm),
        // "Cancel" button
        InputKey::Esc | InputKey::Char('c') => Some(Message::LogLevelDialogCancel),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}
