//! Operation timing on top of a logger
//!
//! A [`PerformanceMonitor`] logs once when the operation ends, at a level
//! picked from the elapsed time:
//!
//! | elapsed      | level |
//! |--------------|-------|
//! | over 5s      | WARN  |
//! | over 1s      | INFO  |
//! | otherwise    | DEBUG |
//!
//! Failures always log at ERROR.

use super::{
    field::{merge_fields, Field},
    log_level::LogLevel,
    logger::SharedLogger,
};
use std::panic::Location;
use std::time::{Duration, Instant};

pub const OPERATION_KEY: &str = "operation";
pub const DURATION_KEY: &str = "duration";
pub const LATENCY_MS_KEY: &str = "latency_ms";

/// Elapsed time above which a finished operation logs at WARN
pub const SLOW_THRESHOLD: Duration = Duration::from_secs(5);

/// Elapsed time above which a finished operation logs at INFO
pub const NOTICEABLE_THRESHOLD: Duration = Duration::from_secs(1);

/// Level a successful operation is reported at
pub fn level_for_elapsed(elapsed: Duration) -> LogLevel {
    if elapsed > SLOW_THRESHOLD {
        LogLevel::Warn
    } else if elapsed > NOTICEABLE_THRESHOLD {
        LogLevel::Info
    } else {
        LogLevel::Debug
    }
}

/// Single-use timer for one operation
///
/// `finish` and `finish_with_error` consume the monitor, so an operation is
/// reported at most once.
///
/// # Example
///
/// ```
/// use service_kit::prelude::*;
/// use std::sync::Arc;
///
/// let logger = TestLogger::new();
/// let monitor = PerformanceMonitor::start(Arc::new(logger.clone()), "load_user")
///     .with_field(Field::string("user_id", "42"));
/// monitor.finish();
///
/// let entry = &logger.all_entries()[0];
/// assert_eq!(entry.level, LogLevel::Debug);
/// assert!(entry.field("latency_ms").is_some());
/// ```
pub struct PerformanceMonitor {
    logger: SharedLogger,
    operation: String,
    started: Instant,
    fields: Vec<Field>,
}

impl PerformanceMonitor {
    pub fn start(logger: SharedLogger, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        Self {
            fields: vec![Field::string(OPERATION_KEY, operation.clone())],
            logger,
            operation,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn with_field(self, field: Field) -> Self {
        self.with_fields(&[field])
    }

    /// Add fields; later keys replace earlier ones
    #[must_use]
    pub fn with_fields(mut self, fields: &[Field]) -> Self {
        self.fields = merge_fields(&self.fields, fields);
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log completion at the level chosen by [`level_for_elapsed`]
    #[track_caller]
    pub fn finish(self) {
        let elapsed = self.elapsed();
        self.report(level_for_elapsed(elapsed), elapsed, None, Location::caller());
    }

    /// Log failure at ERROR whatever the elapsed time
    #[track_caller]
    pub fn finish_with_error(self, err: &dyn std::error::Error) {
        let elapsed = self.elapsed();
        self.report(LogLevel::Error, elapsed, Some(Field::error(err)), Location::caller());
    }

    fn report(self, level: LogLevel, elapsed: Duration, error: Option<Field>, caller: &'static Location<'static>) {
        let mut extra = vec![
            Field::duration(DURATION_KEY, elapsed),
            Field::int64(LATENCY_MS_KEY, i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)),
        ];
        extra.extend(error);

        let message = match level {
            LogLevel::Error => format!("{} failed", self.operation),
            _ => format!("{} completed", self.operation),
        };
        let fields = merge_fields(&self.fields, &extra);
        self.logger.log(level, &message, &fields, Some(caller));
    }
}

/// Run `f` and report its duration
#[track_caller]
pub fn track<T>(logger: SharedLogger, operation: &str, f: impl FnOnce() -> T) -> T {
    let monitor = PerformanceMonitor::start(logger, operation);
    let value = f();
    monitor.finish();
    value
}

/// Run `f` and report its duration, or its error at ERROR
#[track_caller]
pub fn track_result<T, E>(
    logger: SharedLogger,
    operation: &str,
    f: impl FnOnce() -> std::result::Result<T, E>,
) -> std::result::Result<T, E>
where
    E: std::error::Error,
{
    let monitor = PerformanceMonitor::start(logger, operation);
    let result = f();
    match &result {
        Ok(_) => monitor.finish(),
        Err(e) => monitor.finish_with_error(e),
    }
    result
}

/// Reports its operation when dropped
///
/// ```
/// use service_kit::prelude::*;
/// use std::sync::Arc;
///
/// let logger = TestLogger::new();
/// {
///     let _timer = ScopedTimer::new(Arc::new(logger.clone()), "flush_cache");
/// }
/// assert!(logger.has_entry(LogLevel::Debug, "flush_cache completed"));
/// ```
pub struct ScopedTimer {
    monitor: Option<PerformanceMonitor>,
}

impl ScopedTimer {
    pub fn new(logger: SharedLogger, operation: impl Into<String>) -> Self {
        Self {
            monitor: Some(PerformanceMonitor::start(logger, operation)),
        }
    }

    /// Report now instead of at drop
    pub fn stop(mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.finish();
        }
    }

    /// Drop without reporting
    pub fn cancel(mut self) {
        self.monitor = None;
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.finish();
        }
    }
}
