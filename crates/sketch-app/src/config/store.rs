//! Persistent key-value configuration (`config.toml`)

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sketch_core::prelude::*;
use sketch_core::{LogFilterSpec, LogLevel};

use super::keys::ConfigKey;

const CONFIG_FILENAME: &str = "config.toml";
/// Held exclusively while a writer replaces `config.toml`
const LOCK_FILENAME: &str = ".config.toml.lock";

/// Stored settings. Keys not known to this build are kept as-is so they
/// survive a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    values: BTreeMap<String, toml::Value>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boolean value of `key`, or its default when unset or not a boolean
    pub fn get_bool(&self, key: ConfigKey) -> bool {
        match self.values.get(key.as_str()) {
            Some(toml::Value::Boolean(value)) => *value,
            Some(other) => {
                warn!(
                    "Config key '{}' holds {} instead of a boolean, using default",
                    key,
                    other.type_str()
                );
                key.default_bool()
            }
            None => key.default_bool(),
        }
    }

    pub fn put_bool(&mut self, key: ConfigKey, value: bool) {
        self.values
            .insert(key.as_str().to_string(), toml::Value::Boolean(value));
    }

    /// Flip a boolean key and return the new value
    pub fn toggle(&mut self, key: ConfigKey) -> bool {
        let value = !self.get_bool(key);
        self.put_bool(key, value);
        value
    }

    pub fn get_string(&self, key: ConfigKey) -> Option<String> {
        match self.values.get(key.as_str()) {
            Some(toml::Value::String(value)) => Some(value.clone()),
            Some(other) => {
                warn!(
                    "Config key '{}' holds {} instead of a string, using default",
                    key,
                    other.type_str()
                );
                key.default_string().map(str::to_string)
            }
            None => key.default_string().map(str::to_string),
        }
    }

    pub fn put_string(&mut self, key: ConfigKey, value: impl Into<String>) {
        self.values
            .insert(key.as_str().to_string(), toml::Value::String(value.into()));
    }

    /// Stored log level. Unrecognized text falls back to the default.
    pub fn log_level(&self) -> LogLevel {
        let Some(stored) = self.get_string(ConfigKey::LogLevel) else {
            return LogLevel::default();
        };
        match stored.parse() {
            Ok(level) => level,
            Err(e) => {
                warn!("{}, using {}", e, LogLevel::default());
                LogLevel::default()
            }
        }
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.put_string(ConfigKey::LogLevel, level.label());
    }

    /// Log filter implied by the log level and log-category toggles
    pub fn log_filter_spec(&self) -> LogFilterSpec {
        let muted_targets = ConfigKey::ALL
            .into_iter()
            .filter(|key| !self.get_bool(*key))
            .filter_map(|key| key.log_target())
            .collect();

        LogFilterSpec {
            level: self.log_level(),
            muted_targets,
            sync_to_disk: self.get_bool(ConfigKey::OutLog2Sdcard),
        }
    }

    /// Raw entries, including keys unknown to this build
    pub fn raw_values(&self) -> &BTreeMap<String, toml::Value> {
        &self.values
    }
}

/// Default directory holding `config.toml`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sketch-drawer")
}

/// Load `<dir>/config.toml`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(dir: &Path) -> AppConfig {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return AppConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                debug!("Loaded config from {:?}", config_path);
                config
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                AppConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            AppConfig::default()
        }
    }
}

/// Write `<dir>/config.toml` atomically. Each call writes its own temp file
/// and renames it over the target while holding the directory's lock file,
/// so concurrent writers never see each other's partial output.
pub fn save_config(dir: &Path, config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;

    let config_path = dir.join(CONFIG_FILENAME);

    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    let lock = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(dir.join(LOCK_FILENAME))
        .map_err(|e| Error::config(format!("Failed to open lock file: {}", e)))?;
    lock.lock_exclusive()
        .map_err(|e| Error::config(format!("Failed to lock config: {}", e)))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".config.toml.")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::config(format!("Failed to create temp file: {}", e)))?;
    temp.write_all(full_content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
    temp.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {}", e)))?;

    temp.persist(&config_path)
        .map_err(|e| Error::config(format!("Failed to replace {}: {}", CONFIG_FILENAME, e.error)))?;

    // Closing the lock file releases the lock
    drop(lock);

    debug!("Saved config to {:?}", config_path);
    Ok(())
}

fn generate_config_header() -> String {
    r#"# Sketch Drawer Configuration
# Generated by the settings drawer; unknown keys are preserved

"#
    .to_string()
}
