//! "Switch Log Level" picker drawn over the drawer

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use sketch_app::state::LogLevelDialogState;
use sketch_core::LogLevel;

use super::modal_overlay;
use crate::theme::styles;

const DIALOG_WIDTH: u16 = 32;

pub struct LogLevelDialog<'a> {
    state: &'a LogLevelDialogState,
    current: LogLevel,
}

impl<'a> LogLevelDialog<'a> {
    pub fn new(state: &'a LogLevelDialogState, current: LogLevel) -> Self {
        Self { state, current }
    }
}

impl Widget for LogLevelDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = LogLevelDialogState::items(self.current);

        // Borders, one blank line, then the cancel line
        let height = items.len() as u16 + 4;
        let dialog_area = modal_overlay::centered_rect(DIALOG_WIDTH, height, area);

        modal_overlay::dim_background(buf, area);
        modal_overlay::clear_area(buf, dialog_area);
        modal_overlay::render_shadow(buf, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::frame_border(true))
            .title(Span::styled(
                format!(" {} ", LogLevelDialogState::TITLE),
                styles::frame_title(),
            ))
            .style(styles::dialog_surface());

        let mut lines: Vec<Line> = items
            .into_iter()
            .enumerate()
            .map(|(idx, label)| item_line(label, idx == self.state.selected))
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Esc ", styles::key_hint()),
            Span::styled(LogLevelDialogState::CANCEL_LABEL, styles::caption()),
        ]));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .render(dialog_area, buf);
    }
}

fn item_line(label: String, is_selected: bool) -> Line<'static> {
    let pointer = if is_selected {
        Span::styled("▸ ", styles::dialog_pointer())
    } else {
        Span::raw("  ")
    };
    Line::from(vec![pointer, Span::styled(label, styles::dialog_item(is_selected))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_dialog_lists_levels_and_cancel() {
        let mut term = TestTerminal::new();
        let state = LogLevelDialogState::open(LogLevel::Info);
        let area = term.area();
        term.render_widget(LogLevelDialog::new(&state, LogLevel::Info), area);

        assert!(term.buffer_contains("Switch Log Level"));
        for level in LogLevel::ALL {
            assert!(term.buffer_contains(level.label()));
        }
        assert!(term.buffer_contains("INFO (*)"));
        assert!(term.buffer_contains("Cancel"));
    }

    #[test]
    fn test_dialog_marks_selection_separately_from_current() {
        let mut term = TestTerminal::new();
        let mut state = LogLevelDialogState::open(LogLevel::Info);
        state.next();
        let area = term.area();
        term.render_widget(LogLevelDialog::new(&state, LogLevel::Info), area);

        assert!(term.buffer_contains("▸ WARNING"));
        assert!(term.buffer_contains("INFO (*)"));
        assert!(!term.buffer_contains("▸ INFO"));
    }
}
