//! Drawer menu: entry model, builder and list adapter
//!
//! - `entry`: header, page, toggle and info row types
//! - `page`: pages the drawer links to
//! - `builder`: the ordered menu
//! - `adapter`: row display model and click dispatch

pub mod adapter;
pub mod builder;
pub mod entry;
pub mod page;

pub use adapter::{click_action, menu_rows, MenuClick, MenuRow, RowKind};
pub use builder::build_menu;
pub use entry::{CheckMenu, InfoContext, InfoKind, InfoMenu, MenuEntry, PENDING_INFO};
pub use page::Page;
