//! Logger that discards everything

use crate::core::{Backend, CallerLocation, Field, LogLevel, Logger, Result, SharedLogger};
use std::sync::Arc;

/// Discards every entry, never terminates on `Fatal`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl NoopLogger {
    pub fn new() -> Self {
        NoopLogger
    }
}

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _fields: &[Field], _caller: Option<CallerLocation>) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn with(&self, _fields: &[Field]) -> SharedLogger {
        Arc::new(NoopLogger)
    }

    fn named(&self, _name: &str) -> SharedLogger {
        Arc::new(NoopLogger)
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> Backend {
        Backend::Noop
    }
}
