//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `menu`: Drawer row activation and log-level dialog
//! - `bus`: Reactions to events coming back from the bus

pub(crate) mod bus;
pub(crate) mod keys;
pub(crate) mod menu;
pub(crate) mod update;


use sketch_cache::CacheKind;

use crate::config::{AppConfig, ConfigKey};
use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Re-read used/max sizes of every cache
    RefreshCacheStats,

    /// Empty one cache. The disk cache is cleared on a blocking task.
    ClearCache(CacheKind),

    /// A setting changed and was saved: apply cache and log side effects,
    /// then refresh the stats
    ConfigChanged { key: ConfigKey, config: AppConfig },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
