//! What each part of the drawer UI looks like

use ratatui::style::{Modifier, Style};

use super::palette;

// --- Surfaces ---

pub fn screen() -> Style {
    Style::default().bg(palette::DEEPEST_BG)
}

pub fn drawer_surface() -> Style {
    Style::default().bg(palette::DRAWER_BG)
}

pub fn dialog_surface() -> Style {
    Style::default().bg(palette::POPUP_BG)
}

/// Border of the drawer or dialog (`focused`) or of the main page
pub fn frame_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(palette::BORDER_ACTIVE)
    } else {
        Style::default().fg(palette::BORDER_DIM)
    }
}

pub fn frame_title() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Drawer rows ---

/// `Cache Menu` style section titles
pub fn section_title() -> Style {
    Style::default()
        .fg(palette::ACCENT_DIM)
        .add_modifier(Modifier::BOLD)
}

/// The `───` rule after a section title
pub fn section_rule() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn row_label(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette::TEXT_SECONDARY)
    }
}

/// Background of the selected row
pub fn selected_row() -> Style {
    Style::default().bg(palette::SELECTED_ROW_BG)
}

/// The `▎` bar in front of the selected row
pub fn selection_bar() -> Style {
    Style::default().fg(palette::ACCENT)
}

/// `[x]` in green, `[ ]` muted
pub fn toggle(on: bool, selected: bool) -> Style {
    let style = if on {
        Style::default().fg(palette::STATUS_GREEN)
    } else {
        Style::default().fg(palette::TEXT_MUTED)
    };
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Cache sizes and the current log level
pub fn info_value(selected: bool) -> Style {
    let style = Style::default().fg(palette::ACCENT);
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn position_counter() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Log level dialog ---

pub fn dialog_item(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(palette::SELECTED_ROW_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette::TEXT_PRIMARY)
    }
}

/// The `▸` pointer at the highlighted level
pub fn dialog_pointer() -> Style {
    Style::default().fg(palette::ACCENT)
}

// --- Main page ---

/// Fixed captions such as `Background:`
pub fn caption() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn image_url() -> Style {
    Style::default().fg(palette::ACCENT)
}

/// Placeholders and the recent event list
pub fn faint() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn status_line(is_error: bool) -> Style {
    if is_error {
        Style::default().fg(palette::STATUS_RED)
    } else {
        Style::default().fg(palette::STATUS_GREEN)
    }
}

/// Keybinding hints in footers and dialogs
pub fn key_hint() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_colors_follow_state() {
        assert_eq!(toggle(true, false).fg, Some(palette::STATUS_GREEN));
        assert_eq!(toggle(false, false).fg, Some(palette::TEXT_MUTED));
        assert!(toggle(false, true).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_focused_frame_is_highlighted() {
        assert_eq!(frame_border(true).fg, Some(palette::BORDER_ACTIVE));
        assert_eq!(frame_border(false).fg, Some(palette::BORDER_DIM));
    }
}
