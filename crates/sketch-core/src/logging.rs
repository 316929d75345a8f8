//! Logging configuration using tracing
//!
//! Two file sinks are installed:
//! - the daily rolling application log in `~/.local/share/sketch-drawer/logs/`
//! - the "sync to disk" log in `<cache dir>/sketch_log/`, muted unless the
//!   matching toggle is on
//!
//! Both sinks sit behind reloadable filters so the log-level picker and the
//! per-category toggles apply without a restart. `SKETCH_LOG` overrides the
//! configured level of the main log for the whole run.
//!
//! # Examples
//! ```bash
//! SKETCH_LOG=debug cargo run
//! SKETCH_LOG=sketch::cache=trace cargo run
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Layer, Registry};

use crate::error::{Error, Result};
use crate::types::LogLevel;

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "SKETCH_LOG";

/// Tracing targets for the individually switchable log categories
pub mod targets {
    /// Request flow through the image pipeline
    pub const FLOW: &str = "sketch::flow";
    /// Memory/disk cache and bitmap pool activity
    pub const CACHE: &str = "sketch::cache";
    /// Gesture zoom
    pub const ZOOM: &str = "sketch::zoom";
    /// Block display while zoomed
    pub const ZOOM_BLOCK: &str = "sketch::zoom_block";
    /// Elapsed-time measurements
    pub const TIME: &str = "sketch::time";
}

/// What the log filters should let through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilterSpec {
    /// Global verbosity
    pub level: LogLevel,
    /// Category targets that are switched off
    pub muted_targets: Vec<&'static str>,
    /// Whether the sync-to-disk sink is active
    pub sync_to_disk: bool,
}

impl Default for LogFilterSpec {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            muted_targets: Vec::new(),
            sync_to_disk: false,
        }
    }
}

impl LogFilterSpec {
    /// Render as an `EnvFilter` directive string, e.g. `"debug,sketch::zoom=off"`
    pub fn directives(&self) -> String {
        let mut directives = self.level.as_directive().to_string();
        for target in &self.muted_targets {
            directives.push(',');
            directives.push_str(target);
            directives.push_str("=off");
        }
        directives
    }

    fn app_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(self.directives())
            .map_err(|e| Error::logging(format!("Invalid log filter: {}", e)))
    }

    fn disk_filter(&self) -> Result<EnvFilter> {
        if self.sync_to_disk {
            self.app_filter()
        } else {
            Ok(EnvFilter::new("off"))
        }
    }
}

/// Where the log files go
#[derive(Debug, Clone)]
pub struct LogPaths {
    /// Directory of the rolling application log
    pub log_dir: PathBuf,
    /// Directory of the sync-to-disk log
    pub sync_dir: PathBuf,
}

impl LogPaths {
    /// Default application log directory plus `<cache_dir>/sketch_log`
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            log_dir: default_log_directory(),
            sync_dir: cache_dir.join("sketch_log"),
        }
    }
}

/// Directives from `SKETCH_LOG`, if set and parseable
fn env_override() -> Option<String> {
    let directives = std::env::var(LOG_ENV).ok()?;
    if directives.trim().is_empty() {
        return None;
    }
    EnvFilter::try_new(&directives).ok().map(|_| directives)
}

/// Main-log filter: `SKETCH_LOG` wins over the stored level
fn app_filter(env_override: Option<&str>, spec: &LogFilterSpec) -> Result<EnvFilter> {
    match env_override {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| Error::logging(format!("Invalid {} filter: {}", LOG_ENV, e))),
        None => spec.app_filter(),
    }
}

/// Handle for changing the installed filters at runtime
pub struct LogHandle {
    app: reload::Handle<EnvFilter, Registry>,
    disk: reload::Handle<EnvFilter, Registry>,
    /// Captured at init; every reload keeps it for the main log
    env_override: Option<String>,
}

impl LogHandle {
    /// Replace both filters according to `spec`. While `SKETCH_LOG` was set
    /// at startup the main log keeps that filter and only the disk sink
    /// follows `spec`.
    pub fn apply(&self, spec: &LogFilterSpec) -> Result<()> {
        let app = app_filter(self.env_override.as_deref(), spec)?;
        let disk = spec.disk_filter()?;

        self.app
            .reload(app)
            .map_err(|e| Error::logging(format!("Failed to reload log filter: {}", e)))?;
        self.disk
            .reload(disk)
            .map_err(|e| Error::logging(format!("Failed to reload disk log filter: {}", e)))?;

        tracing::debug!(
            "Log filter now '{}' (sync to disk: {})",
            self.env_override.as_deref().unwrap_or(&spec.directives()),
            spec.sync_to_disk
        );
        Ok(())
    }
}

/// Initialize the logging subsystem
pub fn init(paths: &LogPaths, spec: &LogFilterSpec) -> Result<LogHandle> {
    std::fs::create_dir_all(&paths.log_dir)?;
    std::fs::create_dir_all(&paths.sync_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &paths.log_dir, "sketch-drawer.log");
    let sync_appender = RollingFileAppender::new(Rotation::NEVER, &paths.sync_dir, "sketch.log");

    let env_override = env_override();
    let (app_filter, app_handle) =
        reload::Layer::new(app_filter(env_override.as_deref(), spec)?);
    let (disk_filter, disk_handle) = reload::Layer::new(spec.disk_filter()?);

    let layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = vec![
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_timer(fmt::time::ChronoLocal::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_filter(app_filter)
            .boxed(),
        fmt::layer()
            .with_writer(sync_appender)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::ChronoLocal::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_filter(disk_filter)
            .boxed(),
    ];

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| Error::logging(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Sketch Drawer starting");
    tracing::info!("Log directory: {}", paths.log_dir.display());
    match &env_override {
        Some(directives) => tracing::info!("Log filter: {} (from {})", directives, LOG_ENV),
        None => tracing::info!("Log filter: {}", spec.directives()),
    }
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(LogHandle {
        app: app_handle,
        disk: disk_handle,
        env_override,
    })
}

/// Get the application log directory path
pub fn default_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("sketch-drawer").join("logs")
}
