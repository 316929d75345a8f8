//! Sketch Drawer
//!
//! Settings and navigation drawer for the Sketch demo image viewer. The
//! binary wires the cache services, logging and configuration into an
//! [`Engine`] and hands it to either the TUI or the headless NDJSON runner.

pub mod headless;

use std::path::PathBuf;
use std::sync::Arc;

use sketch_app::config::{default_config_dir, load_config};
use sketch_app::{Engine, LogControl};
use sketch_cache::CacheServices;
use sketch_core::logging::{self, LogPaths};
use sketch_core::prelude::*;

pub use headless::runner::run_headless;

/// Where things live and how to start
#[derive(Debug, Clone)]
pub struct Options {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Fill the caches with sample entries so the drawer has sizes to show
    pub seed_demo_data: bool,
}

impl Options {
    pub fn new(config_dir: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.unwrap_or_else(default_config_dir),
            cache_dir: cache_dir.unwrap_or_else(default_cache_dir),
            seed_demo_data: false,
        }
    }

    pub fn seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }
}

/// `<cache dir>/sketch-drawer`, or a relative fallback
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sketch-drawer")
}

/// Run the terminal UI
pub async fn run(options: Options) -> Result<()> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    let engine = build_engine(&options)?;
    let result = sketch_tui::run(engine).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Sketch Drawer exiting");
    result
}

/// Logging, caches and engine shared by both runners
pub(crate) fn build_engine(options: &Options) -> Result<Engine> {
    // Stored log settings decide the initial filter
    let config = load_config(&options.config_dir);
    let handle = logging::init(&LogPaths::new(&options.cache_dir), &config.log_filter_spec())?;
    let log_control: Arc<dyn LogControl> = Arc::new(handle);

    info!("Config directory: {}", options.config_dir.display());
    info!("Cache directory: {}", options.cache_dir.display());

    let caches = CacheServices::open(&options.cache_dir, options.seed_demo_data)
        .context("Failed to open cache services")?;

    Ok(Engine::new(options.config_dir.clone(), caches, log_control))
}
