//! Message types for the application (TEA pattern)

use sketch_cache::{CacheKind, CacheStats};

use crate::event_bus::AppEvent;
use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick for periodic updates
    Tick,

    /// Request to quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Drawer Messages
    // ─────────────────────────────────────────────────────────
    OpenDrawer,
    CloseDrawer,
    ToggleDrawer,

    /// Move the selection to the next selectable row (wraps)
    SelectNext,
    /// Move the selection to the previous selectable row (wraps)
    SelectPrevious,
    SelectFirst,
    SelectLast,

    /// Activate the selected row
    ActivateSelected,
    /// Activate the row at this menu index
    ActivateIndex(usize),

    /// Ask a snapshot consumer (headless runner) to print the menu rows
    RequestMenuSnapshot,

    // ─────────────────────────────────────────────────────────
    // Log Level Dialog Messages
    // ─────────────────────────────────────────────────────────
    LogLevelDialogNext,
    LogLevelDialogPrevious,
    LogLevelDialogConfirm,
    /// Choose the level at this position in the dialog
    LogLevelPicked(usize),
    LogLevelDialogCancel,

    // ─────────────────────────────────────────────────────────
    // Cache Messages
    // ─────────────────────────────────────────────────────────
    /// Fresh stats from the cache services
    CacheStatsLoaded(Vec<CacheStats>),
    /// A clear finished successfully
    CacheCleared(CacheKind),
    CacheClearFailed { cache: CacheKind, error: String },

    // ─────────────────────────────────────────────────────────
    // Main Page Messages
    // ─────────────────────────────────────────────────────────
    /// Request a new main-page background image
    SetBackground(String),

    /// An event published on the bus, delivered back to the app
    Bus(AppEvent),
}
