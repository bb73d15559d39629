//! Application-scoped logger registry
//!
//! Replaces an ambient global logger with an explicit object: `init` once,
//! `get` from anywhere holding the registry, `set` to swap at runtime. A
//! process-wide instance backs the context fallback only.

use super::{
    error::{LoggerError, Result},
    logger::SharedLogger,
};
use crate::backends::NoopLogger;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

/// Holder of the application's default logger
///
/// # Example
///
/// ```
/// use service_kit::prelude::*;
/// use std::sync::Arc;
///
/// let registry = LoggerRegistry::new();
/// registry.init(Arc::new(TestLogger::new())).unwrap();
/// assert!(registry.init(Arc::new(NoopLogger::new())).is_err());
/// assert_eq!(registry.get().backend(), Backend::Test);
/// ```
pub struct LoggerRegistry {
    logger: RwLock<SharedLogger>,
    initialized: AtomicBool,
}

impl LoggerRegistry {
    /// Registry holding the no-op logger
    pub fn new() -> Self {
        Self {
            logger: RwLock::new(Arc::new(NoopLogger::new())),
            initialized: AtomicBool::new(false),
        }
    }

    /// Process-wide registry used by the convenience lookups
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    /// Install the logger; fails if one was already installed
    pub fn init(&self, logger: SharedLogger) -> Result<()> {
        if self.initialized.swap(true, Ordering::AcqRel) {
            return Err(LoggerError::AlreadyInitialized);
        }
        *self.logger.write() = logger;
        Ok(())
    }

    pub fn get(&self) -> SharedLogger {
        self.logger.read().clone()
    }

    /// Replace the logger unconditionally
    pub fn set(&self, logger: SharedLogger) {
        *self.logger.write() = logger;
        self.initialized.store(true, Ordering::Release);
    }

    /// Back to the no-op logger, allowing `init` again
    pub fn reset(&self) {
        *self.logger.write() = Arc::new(NoopLogger::new());
        self.initialized.store(false, Ordering::Release);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::TestLogger;
    use crate::core::logger::Backend;

    #[test]
    fn test_init_once() {
        let registry = LoggerRegistry::new();
        assert_eq!(registry.get().backend(), Backend::Noop);

        registry.init(Arc::new(TestLogger::new())).unwrap();
        assert!(registry.is_initialized());
        assert!(matches!(
            registry.init(Arc::new(TestLogger::new())),
            Err(LoggerError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_set_and_reset() {
        let registry = LoggerRegistry::new();
        registry.set(Arc::new(TestLogger::new()));
        assert_eq!(registry.get().backend(), Backend::Test);

        registry.reset();
        assert!(!registry.is_initialized());
        assert_eq!(registry.get().backend(), Backend::Noop);
        assert!(registry.init(Arc::new(TestLogger::new())).is_ok());
    }
}
