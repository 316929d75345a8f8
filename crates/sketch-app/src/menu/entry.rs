//! Menu entry model

use std::collections::HashMap;

use sketch_cache::{CacheKind, CacheStats};

use super::page::Page;
use crate::config::{AppConfig, ConfigKey};

/// Shown by a cache row until its stats have been loaded
pub const PENDING_INFO: &str = "…";

/// One row of the drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Section header
    Title(String),
    /// Link to a page
    Page(Page),
    /// Boolean toggle bound to a config key
    Check(CheckMenu),
    /// Read-only computed value with a click action
    Info(InfoMenu),
}

impl MenuEntry {
    pub fn title(title: impl Into<String>) -> Self {
        MenuEntry::Title(title.into())
    }

    pub fn check(title: impl Into<String>, key: ConfigKey) -> Self {
        MenuEntry::Check(CheckMenu {
            title: title.into(),
            key,
            close_drawer: true,
        })
    }

    pub fn cache_info(title: impl Into<String>, cache: CacheKind) -> Self {
        MenuEntry::Info(InfoMenu {
            title: title.into(),
            kind: InfoKind::Cache(cache),
        })
    }

    pub fn log_level_info(title: impl Into<String>) -> Self {
        MenuEntry::Info(InfoMenu {
            title: title.into(),
            kind: InfoKind::LogLevel,
        })
    }

    /// Text shown for the row
    pub fn label(&self) -> &str {
        match self {
            MenuEntry::Title(title) => title,
            MenuEntry::Page(page) => page.title(),
            MenuEntry::Check(check) => &check.title,
            MenuEntry::Info(info) => &info.title,
        }
    }

    /// Headers cannot be selected or activated
    pub fn is_selectable(&self) -> bool {
        !matches!(self, MenuEntry::Title(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMenu {
    pub title: String,
    pub key: ConfigKey,
    /// Close the drawer after flipping
    pub close_drawer: bool,
}

impl CheckMenu {
    pub fn is_checked(&self, config: &AppConfig) -> bool {
        config.get_bool(self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    /// Used/max size of a cache; click clears it
    Cache(CacheKind),
    /// Current log level; click opens the picker
    LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoMenu {
    pub title: String,
    pub kind: InfoKind,
}

/// What an info row needs to compute its value
pub struct InfoContext<'a> {
    pub config: &'a AppConfig,
    pub cache_stats: &'a HashMap<CacheKind, CacheStats>,
}

impl InfoMenu {
    pub fn info(&self, ctx: &InfoContext<'_>) -> String {
        match self.kind {
            InfoKind::Cache(kind) => ctx
                .cache_stats
                .get(&kind)
                .map(CacheStats::display)
                .unwrap_or_else(|| PENDING_INFO.to_string()),
            InfoKind::LogLevel => ctx.config.log_level().label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketch_core::LogLevel;

    #[test]
    fn test_cache_info_pending_until_stats_arrive() {
        let config = AppConfig::new();
        let mut stats = HashMap::new();
        let entry = InfoMenu {
            title: "Disk Cache (Click Clean)".into(),
            kind: InfoKind::Cache(CacheKind::Disk),
        };

        let ctx = InfoContext {
            config: &config,
            cache_stats: &stats,
        };
        assert_eq!(entry.info(&ctx), PENDING_INFO);

        stats.insert(
            CacheKind::Disk,
            CacheStats {
                kind: CacheKind::Disk,
                size: 2_500_000,
                max_size: 100_000_000,
                disabled: false,
            },
        );
        let ctx = InfoContext {
            config: &config,
            cache_stats: &stats,
        };
        assert_eq!(entry.info(&ctx), "2.50 MB/100 MB");
    }

    #[test]
    fn test_log_level_info_reads_config() {
        let mut config = AppConfig::new();
        config.set_log_level(LogLevel::Verbose);
        let stats = HashMap::new();
        let entry = InfoMenu {
            title: "Log Level".into(),
            kind: InfoKind::LogLevel,
        };
        let ctx = InfoContext {
            config: &config,
            cache_stats: &stats,
        };
        assert_eq!(entry.info(&ctx), "VERBOSE");
    }

    #[test]
    fn test_titles_are_not_selectable() {
        assert!(!MenuEntry::title("Cache Menu").is_selectable());
        assert!(MenuEntry::Page(Page::About).is_selectable());
        assert!(MenuEntry::check("Read Mode", ConfigKey::ReadMode).is_selectable());
    }
}
