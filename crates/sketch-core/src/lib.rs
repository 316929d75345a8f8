//! # sketch-core - Core Domain Types
//!
//! Foundation crate for Sketch Drawer. Provides error handling, logging setup
//! and the small value types shared by every other crate.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum grouped by the layer that failed
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Logging (`logging`)
//! - [`logging::init()`] - Install the file sinks and reloadable filters
//! - [`LogFilterSpec`] - Level, muted categories and disk-sync flag
//!
//! ### Types (`types`)
//! - [`LogLevel`] - Global verbosity offered by the log-level picker
//! - [`format_file_size()`] - Human-readable byte counts
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use sketch_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all Sketch Drawer crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use logging::{LogFilterSpec, LogHandle, LogPaths};
pub use types::{format_file_size, LogLevel};
