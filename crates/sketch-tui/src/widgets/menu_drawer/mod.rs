//! Drawer widget: the scrollable settings and navigation menu
//!
//! Renders the display rows produced by `AppState::menu_rows()`:
//! - section titles as dimmed headers with a rule
//! - pages as plain labels
//! - toggles with a right-aligned `[x]`/`[ ]` box
//! - info rows with their computed value right-aligned

mod styles;


use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, StatefulWidget, Widget},
};
use sketch_app::menu::{MenuRow, RowKind};
use sketch_app::state::MenuViewState;
use unicode_width::UnicodeWidthStr;

use crate::theme::styles as theme;

use styles::{checkbox, truncate_str, INDICATOR_WIDTH, VALUE_GAP};

pub use styles::{CHECKED, UNCHECKED};

/// Keybinding hints shown under the list
const FOOTER_HINT: &str = "j/k move  Enter select  Esc close";

pub struct MenuDrawer<'a> {
    rows: &'a [MenuRow],
    title: &'a str,
}

impl<'a> MenuDrawer<'a> {
    pub fn new(rows: &'a [MenuRow]) -> Self {
        Self {
            rows,
            title: "Sketch",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl StatefulWidget for MenuDrawer<'_> {
    type State = MenuViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::frame_border(true))
            .title(Span::styled(format!(" {} ", self.title), theme::frame_title()))
            .style(theme::drawer_surface());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [list_area, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        self.render_list(list_area, buf, state);
        self.render_footer(footer_area, buf, state);
    }
}

impl MenuDrawer<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer, state: &mut MenuViewState) {
        let visible = area.height as usize;
        state.ensure_visible(visible);

        let start = state.scroll_offset.min(self.rows.len());
        for (offset, row) in self.rows[start..].iter().take(visible).enumerate() {
            let y = area.y + offset as u16;
            let is_selected = row.index == state.selected_index;
            match row.kind {
                RowKind::Title => render_section_header(area.x, y, area.width, buf, &row.title),
                _ => render_item_row(area.x, y, area.width, buf, row, is_selected),
            }
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer, state: &MenuViewState) {
        let position = format!("{}/{}", state.selected_index + 1, self.rows.len());
        let hint_width = area.width.saturating_sub(position.width() as u16 + 1) as usize;

        let line = Line::from(vec![
            Span::styled(truncate_str(FOOTER_HINT, hint_width), theme::key_hint()),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let x = area.right().saturating_sub(position.width() as u16);
        buf.set_string(x, area.y, position, theme::position_counter());
    }
}

/// Title row: `Cache Menu ───────`
fn render_section_header(x: u16, y: u16, width: u16, buf: &mut Buffer, title: &str) {
    let label = truncate_str(title, width.saturating_sub(1) as usize);
    let rule_width = (width as usize).saturating_sub(label.width() + 1);
    let line = Line::from(vec![
        Span::styled(label, theme::section_title()),
        Span::raw(" "),
        Span::styled("─".repeat(rule_width), theme::section_rule()),
    ]);
    buf.set_line(x, y, &line, width);
}

fn render_item_row(x: u16, y: u16, width: u16, buf: &mut Buffer, row: &MenuRow, is_selected: bool) {
    if is_selected {
        let bg = theme::selected_row();
        for col in x..x.saturating_add(width) {
            if let Some(cell) = buf.cell_mut((col, y)) {
                cell.set_style(bg);
            }
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol("▎");
            cell.set_style(theme::selection_bar());
        }
    }

    let value = match (row.kind, row.value.as_deref()) {
        (RowKind::Check, Some(v)) => Some(Span::styled(
            checkbox(v),
            theme::toggle(v == "true", is_selected),
        )),
        (RowKind::Info, Some(v)) => Some(Span::styled(v.to_string(), theme::info_value(is_selected))),
        _ => None,
    };

    let content_x = x.saturating_add(INDICATOR_WIDTH);
    let content_width = width.saturating_sub(INDICATOR_WIDTH);

    // The value keeps its full width; the label yields
    let value_width = value.as_ref().map_or(0, |v| v.width() as u16);
    let value_width = value_width.min(content_width);
    let label_width = content_width.saturating_sub(value_width + VALUE_GAP);

    let label = truncate_str(&row.title, label_width as usize);
    buf.set_string(content_x, y, label, theme::row_label(is_selected));

    if let Some(value) = value {
        let value_x = content_x + content_width - value_width;
        buf.set_span(value_x, y, &value, value_width);
    }
}
