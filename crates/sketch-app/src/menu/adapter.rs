//! Per-kind presentation of menu entries and click dispatch

use serde::Serialize;
use sketch_cache::CacheKind;

use super::entry::{InfoContext, InfoKind, MenuEntry};
use super::page::Page;
use crate::config::ConfigKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Title,
    Page,
    Check,
    Info,
}

/// Display model of one drawer row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRow {
    pub index: usize,
    pub kind: RowKind,
    pub title: String,
    /// `"true"`/`"false"` for toggles, the computed string for info rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub clickable: bool,
}

impl MenuRow {
    pub fn from_entry(index: usize, entry: &MenuEntry, ctx: &InfoContext<'_>) -> Self {
        let (kind, value) = match entry {
            MenuEntry::Title(_) => (RowKind::Title, None),
            MenuEntry::Page(_) => (RowKind::Page, None),
            MenuEntry::Check(check) => (
                RowKind::Check,
                Some(check.is_checked(ctx.config).to_string()),
            ),
            MenuEntry::Info(info) => (RowKind::Info, Some(info.info(ctx))),
        };

        Self {
            index,
            kind,
            title: entry.label().to_string(),
            value,
            clickable: entry.is_selectable(),
        }
    }
}

/// Rows for the whole menu
pub fn menu_rows(menu: &[MenuEntry], ctx: &InfoContext<'_>) -> Vec<MenuRow> {
    menu.iter()
        .enumerate()
        .map(|(index, entry)| MenuRow::from_entry(index, entry, ctx))
        .collect()
}

/// What activating a row should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    OpenPage(Page),
    Toggle { key: ConfigKey, close_drawer: bool },
    ClearCache(CacheKind),
    PickLogLevel,
    None,
}

pub fn click_action(entry: &MenuEntry) -> MenuClick {
    match entry {
        MenuEntry::Title(_) => MenuClick::None,
        MenuEntry::Page(page) => MenuClick::OpenPage(*page),
        MenuEntry::Check(check) => MenuClick::Toggle {
            key: check.key,
            close_drawer: check.close_drawer,
        },
        MenuEntry::Info(info) => match info.kind {
            InfoKind::Cache(kind) => MenuClick::ClearCache(kind),
            InfoKind::LogLevel => MenuClick::PickLogLevel,
        },
    }
}
