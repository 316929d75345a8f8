//! Main page behind the drawer: current page, background and bus activity

use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use sketch_app::menu::Page;
use sketch_app::state::StatusMessage;
use sketch_app::AppEvent;

use crate::theme::styles;

const NO_BACKGROUND: &str = "(none)";
const KEY_HINT: &str = "m menu  q quit";

pub struct MainPage<'a> {
    page: Page,
    background_url: Option<&'a str>,
    status: Option<&'a StatusMessage>,
    events: &'a VecDeque<AppEvent>,
}

impl<'a> MainPage<'a> {
    pub fn new(page: Page, events: &'a VecDeque<AppEvent>) -> Self {
        Self {
            page,
            background_url: None,
            status: None,
            events,
        }
    }

    pub fn background_url(mut self, url: Option<&'a str>) -> Self {
        self.background_url = url;
        self
    }

    pub fn status(mut self, status: Option<&'a StatusMessage>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for MainPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::frame_border(false))
            .title(Span::styled(format!(" {} ", self.page.title()), styles::frame_title()))
            .style(styles::screen());

        let inner = block.inner(area);
        block.render(area, buf);

        let [bg_area, _, events_area, status_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let background = Line::from(vec![
            Span::styled("Background: ", styles::caption()),
            match self.background_url {
                Some(url) => Span::styled(url, styles::image_url()),
                None => Span::styled(NO_BACKGROUND, styles::faint()),
            },
        ]);
        buf.set_line(bg_area.x, bg_area.y, &background, bg_area.width);

        self.render_events(events_area, buf);

        if let Some(status) = self.status {
            let line = Span::styled(status.text.as_str(), styles::status_line(status.is_error));
            Paragraph::new(line).render(status_area, buf);
        }

        buf.set_string(hint_area.x, hint_area.y, KEY_HINT, styles::key_hint());
    }
}

impl MainPage<'_> {
    /// Newest events at the bottom, as many as fit
    fn render_events(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut lines = vec![Line::styled("Recent events", styles::caption())];
        let room = (area.height as usize).saturating_sub(1);
        let skip = self.events.len().saturating_sub(room);
        lines.extend(
            self.events
                .iter()
                .skip(skip)
                .map(|event| Line::styled(format!("  {}", describe_event(event)), styles::faint())),
        );

        Paragraph::new(lines).render(area, buf);
    }
}

/// One-line human description of a bus event
pub fn describe_event(event: &AppEvent) -> String {
    match event {
        AppEvent::DrawerOpened => "drawer opened".to_string(),
        AppEvent::CloseDrawer => "close drawer".to_string(),
        AppEvent::CacheCleaned { cache } => format!("cache cleaned: {}", cache),
        AppEvent::ChangePage { page } => format!("change page: {}", page),
        AppEvent::ChangeMainPageBg { image_url } => format!("change background: {}", image_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use crate::theme::palette;
    use sketch_cache::CacheKind;

    #[test]
    fn test_main_page_shows_title_and_empty_background() {
        let events = VecDeque::new();
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(MainPage::new(Page::GifSearch, &events), area);

        assert!(term.buffer_contains("GIF Search"));
        assert!(term.buffer_contains("Background: (none)"));
        assert!(term.buffer_contains("m menu"));
    }

    #[test]
    fn test_main_page_lists_recent_events() {
        let events = VecDeque::from([
            AppEvent::DrawerOpened,
            AppEvent::CacheCleaned {
                cache: CacheKind::Disk,
            },
        ]);
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(MainPage::new(Page::Unsplash, &events), area);

        assert!(term.buffer_contains("drawer opened"));
        assert!(term.buffer_contains("cache cleaned: Disk"));
    }

    #[test]
    fn test_main_page_keeps_newest_events_when_short() {
        let mut events = VecDeque::new();
        for _ in 0..30 {
            events.push_back(AppEvent::DrawerOpened);
        }
        events.push_back(AppEvent::ChangePage { page: Page::About });
        let mut term = TestTerminal::compact();
        let area = term.area();
        term.render_widget(MainPage::new(Page::About, &events), area);

        assert!(term.buffer_contains("change page: About"));
    }

    #[test]
    fn test_error_status_is_red() {
        let events = VecDeque::new();
        let status = StatusMessage {
            text: "Invalid image URL".to_string(),
            is_error: true,
        };
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(
            MainPage::new(Page::Unsplash, &events).status(Some(&status)),
            area,
        );

        assert!(term.buffer_contains("Invalid image URL"));
        let content = term.content();
        let row = content
            .lines()
            .position(|l| l.contains("Invalid image URL"))
            .unwrap() as u16;
        let col = content
            .lines()
            .nth(row as usize)
            .unwrap()
            .chars()
            .position(|c| c == 'I')
            .unwrap() as u16;
        assert_eq!(term.buffer()[(col, row)].fg, palette::STATUS_RED);
    }
}
