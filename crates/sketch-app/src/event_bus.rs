//! Application event bus
//!
//! Cross-component notifications ("drawer opened", "cache cleaned", ...) are
//! published here. External consumers (the headless runner, tests) subscribe
//! through [`EventBus::subscribe`]; inside the app every published event is
//! also fed back through the update function as `Message::Bus`.

use serde::Serialize;
use sketch_cache::CacheKind;
use tokio::sync::broadcast;

use crate::menu::Page;

/// Capacity of the broadcast buffer. Slow subscribers see `Lagged`.
pub const EVENT_BUS_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// The drawer became visible
    DrawerOpened,
    /// Ask the drawer to close
    CloseDrawer,
    /// A cache was emptied
    CacheCleaned { cache: CacheKind },
    /// Switch the main page
    ChangePage { page: Page },
    /// Replace the main-page background image
    ChangeMainPageBg { image_url: String },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { tx }
    }

    /// Publish to every current subscriber. Returns how many received it.
    pub fn post(&self, event: AppEvent) -> usize {
        tracing::debug!("Bus event: {:?}", event);
        // No subscribers is fine
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}
