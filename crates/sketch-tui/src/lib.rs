//! sketch-tui - Terminal UI for Sketch Drawer
//!
//! This crate provides the ratatui-based terminal interface. It takes an Engine
//! from sketch-app and adds terminal rendering, event polling and the drawer
//! widgets.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
