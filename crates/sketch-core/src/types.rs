//! Shared domain types: log verbosity and human-readable sizes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Global log verbosity, as offered by the log-level picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Verbose,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    None,
}

impl LogLevel {
    /// All levels in picker order
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::None => "NONE",
        }
    }

    /// The `EnvFilter` directive for this level
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
            LogLevel::None => "off",
        }
    }

    /// Position in [`LogLevel::ALL`]
    pub fn index(&self) -> usize {
        match self {
            LogLevel::Verbose => 0,
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warning => 3,
            LogLevel::Error => 4,
            LogLevel::None => 5,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::config_invalid("log_level", format!("unknown level '{}'", s)))
    }
}

const SIZE_SUFFIXES: [&str; 5] = ["kB", "MB", "GB", "TB", "PB"];

/// Format a byte count for display, e.g. `"1.50 kB"` or `"100 MB"`.
///
/// Uses SI units (1000). A value is promoted to the next unit once it
/// exceeds 900. Byte values and values of 100 or more print without
/// decimals, everything else with two.
pub fn format_file_size(bytes: u64) -> String {
    let mut result = bytes as f64;
    let mut suffix = "B";

    for next in SIZE_SUFFIXES {
        if result <= 900.0 {
            break;
        }
        result /= 1000.0;
        suffix = next;
    }

    if suffix == "B" || result >= 100.0 {
        format!("{:.0} {}", result, suffix)
    } else {
        format!("{:.2} {}", result, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_labels_in_picker_order() {
        let labels: Vec<&str> = LogLevel::ALL.iter().map(|l| l.label()).collect();
        assert_eq!(
            labels,
            vec!["VERBOSE", "DEBUG", "INFO", "WARNING", "ERROR", "NONE"]
        );
    }

    #[test]
    fn test_log_level_parse_is_case_insensitive() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" NONE ".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert!("LOUD".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_index_round_trip() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_index(level.index()), Some(level));
        }
        assert_eq!(LogLevel::from_index(6), None);
    }

    #[test]
    fn test_log_level_directives() {
        assert_eq!(LogLevel::Verbose.as_directive(), "trace");
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
        assert_eq!(LogLevel::None.as_directive(), "off");
    }

    #[test]
    fn test_format_file_size_bytes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(900), "900 B");
    }

    #[test]
    fn test_format_file_size_promotes_above_900() {
        assert_eq!(format_file_size(901), "0.90 kB");
        assert_eq!(format_file_size(1_500), "1.50 kB");
        assert_eq!(format_file_size(250_000), "250 kB");
    }

    #[test]
    fn test_format_file_size_large_units() {
        assert_eq!(format_file_size(64_000_000), "64.00 MB");
        assert_eq!(format_file_size(100_000_000), "100 MB");
        assert_eq!(format_file_size(2_340_000_000), "2.34 GB");
    }
}
