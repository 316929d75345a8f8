//! Runtime control over the installed log filters

use sketch_core::{LogFilterSpec, LogHandle, Result};

/// Applies a new log filter. Implemented by the tracing reload handle; the
/// engine only sees this trait.
#[cfg_attr(test, mockall::automock)]
pub trait LogControl: Send + Sync {
    fn apply(&self, spec: &LogFilterSpec) -> Result<()>;
}

impl LogControl for LogHandle {
    fn apply(&self, spec: &LogFilterSpec) -> Result<()> {
        LogHandle::apply(self, spec)
    }
}

/// For runs without an installed subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogControl;

impl LogControl for NoopLogControl {
    fn apply(&self, spec: &LogFilterSpec) -> Result<()> {
        tracing::trace!("Log filter '{}' not applied (no subscriber)", spec.directives());
        Ok(())
    }
}
