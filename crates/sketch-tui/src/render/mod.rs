//! Main render/view function (View in TEA pattern)


use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;
use sketch_app::state::{AppState, UiMode};

use crate::theme::styles;
use crate::widgets::{self, modal_overlay};

/// Share of the terminal width the open drawer takes
pub const DRAWER_WIDTH_PERCENT: u16 = 70;

/// Render the complete UI.
///
/// Only mutates the drawer's scroll offset, which depends on the frame height.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(styles::screen());
    frame.render_widget(bg_block, area);

    let main_page = widgets::MainPage::new(state.current_page, &state.event_log)
        .background_url(state.background_url.as_deref())
        .status(state.status.as_ref());
    frame.render_widget(main_page, area);

    if state.is_drawer_open() {
        let (drawer, rest) = drawer_layout(area);
        modal_overlay::dim_background(frame.buffer_mut(), rest);
        frame.render_widget(Clear, drawer);

        let rows = state.menu_rows();
        frame.render_stateful_widget(widgets::MenuDrawer::new(&rows), drawer, &mut state.menu_view);
    }

    if state.ui_mode == UiMode::LogLevelDialog {
        let dialog = widgets::LogLevelDialog::new(&state.log_level_dialog, state.config.log_level());
        frame.render_widget(dialog, area);
    }
}

/// Split into the drawer (left) and the still-visible main page (right)
fn drawer_layout(area: Rect) -> (Rect, Rect) {
    let [drawer, rest] = Layout::horizontal([
        Constraint::Percentage(DRAWER_WIDTH_PERCENT),
        Constraint::Min(0),
    ])
    .areas(area);
    (drawer, rest)
}
