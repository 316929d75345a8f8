//! Headless mode - NDJSON event output for scripted use
//!
//! Drives the drawer from stdin commands and writes one JSON object per line
//! to stdout. Every object has an `"event"` field and a millisecond
//! `"timestamp"`.
//!
//! # Example Output
//!
//! ```json
//! {"event":"ready","menu_rows":61,"log_level":"INFO","timestamp":1704700001000}
//! {"event":"bus","bus":{"event":"drawer_opened"},"timestamp":1704700002000}
//! {"event":"cache_stats","caches":[{"kind":"memory","size":0,"max_size":64000000,"disabled":false}],"timestamp":1704700002010}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use sketch_app::menu::{MenuRow, Page};
use sketch_app::AppEvent;
use sketch_cache::CacheStats;
use std::io::{self, Write};
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Engine built, stdin is being read
    Ready {
        menu_rows: usize,
        log_level: String,
        timestamp: i64,
    },

    /// An event published on the app's event bus
    Bus { bus: AppEvent, timestamp: i64 },

    /// Full drawer contents, answer to `list`
    Menu {
        mode: String,
        selected: usize,
        rows: Vec<MenuRow>,
        timestamp: i64,
    },

    /// Fresh cache sizes
    CacheStats {
        caches: Vec<CacheStats>,
        timestamp: i64,
    },

    /// Main, drawer or dialog became active
    ModeChanged { mode: String, timestamp: i64 },

    /// The main page switched
    PageChanged { page: Page, timestamp: i64 },

    /// Non-error feedback line
    Status { message: String, timestamp: i64 },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one object per line, flushed immediately
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn ready(menu_rows: usize, log_level: &str) -> Self {
        Self::Ready {
            menu_rows,
            log_level: log_level.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn bus(event: AppEvent) -> Self {
        Self::Bus {
            bus: event,
            timestamp: Self::now(),
        }
    }

    pub fn menu(mode: &str, selected: usize, rows: Vec<MenuRow>) -> Self {
        Self::Menu {
            mode: mode.to_string(),
            selected,
            rows,
            timestamp: Self::now(),
        }
    }

    pub fn cache_stats(caches: Vec<CacheStats>) -> Self {
        Self::CacheStats {
            caches,
            timestamp: Self::now(),
        }
    }

    pub fn mode_changed(mode: &str) -> Self {
        Self::ModeChanged {
            mode: mode.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn page_changed(page: Page) -> Self {
        Self::PageChanged {
            page,
            timestamp: Self::now(),
        }
    }

    pub fn status(message: String) -> Self {
        Self::Status {
            message,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketch_app::menu::RowKind;
    use sketch_cache::CacheKind;

    fn to_value(event: &HeadlessEvent) -> serde_json::Value {
        let json = serde_json::to_string(event).expect("serialization failed");
        serde_json::from_str(&json).expect("invalid JSON")
    }

    #[test]
    fn test_bus_event_nests_app_event() {
        let value = to_value(&HeadlessEvent::bus(AppEvent::CacheCleaned {
            cache: CacheKind::BitmapPool,
        }));

        assert_eq!(value["event"], "bus");
        assert_eq!(value["bus"]["event"], "cache_cleaned");
        assert_eq!(value["bus"]["cache"], "bitmap_pool");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_menu_serialization() {
        let rows = vec![MenuRow {
            index: 0,
            kind: RowKind::Title,
            title: "Sample Page".to_string(),
            value: None,
            clickable: false,
        }];
        let value = to_value(&HeadlessEvent::menu("drawer", 1, rows));

        assert_eq!(value["event"], "menu");
        assert_eq!(value["mode"], "drawer");
        assert_eq!(value["selected"], 1);
        assert_eq!(value["rows"][0]["kind"], "title");
        assert!(value["rows"][0].get("value").is_none());
    }

    #[test]
    fn test_page_changed_uses_snake_case() {
        let value = to_value(&HeadlessEvent::page_changed(Page::GifSearch));

        assert_eq!(value["event"], "page_changed");
        assert_eq!(value["page"], "gif_search");
    }

    #[test]
    fn test_error_serialization() {
        let value = to_value(&HeadlessEvent::error("Unknown command: fly".to_string(), false));

        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "Unknown command: fly");
        assert_eq!(value["fatal"], false);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_ready_serialization() {
        let value = to_value(&HeadlessEvent::ready(61, "INFO"));

        assert_eq!(value["event"], "ready");
        assert_eq!(value["menu_rows"], 61);
        assert_eq!(value["log_level"], "INFO");
    }
}
