//! Configuration store for the drawer settings
//!
//! Settings live in `<config dir>/sketch-drawer/config.toml` under a single
//! `[values]` table keyed by [`ConfigKey`] names.

pub mod keys;
pub mod store;

pub use keys::ConfigKey;
pub use store::{default_config_dir, load_config, save_config, AppConfig};
