//! sketch-app - Drawer state and orchestration for Sketch Drawer
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! settings drawer: the menu model, the configuration store, the event bus
//! and the Engine that ties them to the cache services.

pub mod actions;
pub mod config;
pub mod engine;
pub mod event_bus;
pub mod handler;
pub mod input_key;
pub mod log_control;
pub mod menu;
pub mod message;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use event_bus::{AppEvent, EventBus};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use log_control::{LogControl, NoopLogControl};
pub use message::Message;
pub use state::{AppState, UiMode};
