//! Widget components for the drawer TUI

mod log_level_dialog;
mod main_page;
mod menu_drawer;
pub mod modal_overlay;

pub use log_level_dialog::LogLevelDialog;
pub use main_page::{describe_event, MainPage};
pub use menu_drawer::{MenuDrawer, CHECKED, UNCHECKED};
