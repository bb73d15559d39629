//! Key/value logging on top of a typed logger

use super::{
    field::Field,
    log_level::LogLevel,
    logger::{SharedLogger, CallerLocation},
};
use std::fmt;
use std::panic::Location;

/// Value recorded for a trailing key without a value
pub const MISSING_VALUE: &str = "(MISSING)";

/// Logger taking alternating keys and values instead of typed fields
///
/// Every key and value is stringified, so each pair becomes a string field.
///
/// # Example
///
/// ```
/// use service_kit::prelude::*;
///
/// let logger = TestLogger::new();
/// logger.sugar().infow("login", &[&"user", &"alice", &"attempt", &3]);
///
/// let entry = &logger.all_entries()[0];
/// assert_eq!(entry.field("attempt"), Some(&FieldValue::String("3".to_string())));
/// ```
#[derive(Clone)]
pub struct SugaredLogger {
    inner: SharedLogger,
}

impl SugaredLogger {
    pub fn new(inner: SharedLogger) -> Self {
        Self { inner }
    }

    /// The typed logger underneath
    pub fn desugar(&self) -> SharedLogger {
        self.inner.clone()
    }

    /// New sugared logger with the pairs merged into its fields
    pub fn with(&self, key_values: &[&dyn fmt::Display]) -> SugaredLogger {
        SugaredLogger::new(self.inner.with(&pairs_to_fields(key_values)))
    }

    pub fn named(&self, name: &str) -> SugaredLogger {
        SugaredLogger::new(self.inner.named(name))
    }

    fn logw(&self, level: LogLevel, message: &str, key_values: &[&dyn fmt::Display], caller: CallerLocation) {
        if level != LogLevel::Fatal && !self.inner.enabled(level) {
            return;
        }
        self.inner.log(level, message, &pairs_to_fields(key_values), Some(caller));
    }

    #[track_caller]
    pub fn debugw(&self, message: &str, key_values: &[&dyn fmt::Display]) {
        self.logw(LogLevel::Debug, message, key_values, Location::caller());
    }

    #[track_caller]
    pub fn infow(&self, message: &str, key_values: &[&dyn fmt::Display]) {
        self.logw(LogLevel::Info, message, key_values, Location::caller());
    }

    #[track_caller]
    pub fn warnw(&self, message: &str, key_values: &[&dyn fmt::Display]) {
        self.logw(LogLevel::Warn, message, key_values, Location::caller());
    }

    #[track_caller]
    pub fn errorw(&self, message: &str, key_values: &[&dyn fmt::Display]) {
        self.logw(LogLevel::Error, message, key_values, Location::caller());
    }

    #[track_caller]
    pub fn fatalw(&self, message: &str, key_values: &[&dyn fmt::Display]) {
        self.logw(LogLevel::Fatal, message, key_values, Location::caller());
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.inner.logf(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.inner.logf(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.inner.logf(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.inner.logf(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.inner.logf(LogLevel::Fatal, args);
    }

    pub fn sync(&self) -> super::error::Result<()> {
        self.inner.sync()
    }
}

impl fmt::Debug for SugaredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SugaredLogger")
            .field("backend", &self.inner.backend())
            .finish()
    }
}

/// Pair up alternating keys and values as string fields
pub fn pairs_to_fields(key_values: &[&dyn fmt::Display]) -> Vec<Field> {
    key_values
        .chunks(2)
        .map(|pair| match pair {
            [key, value] => Field::string(key.to_string(), value.to_string()),
            [key] => Field::string(key.to_string(), MISSING_VALUE),
            _ => Field::Skip,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    #[test]
    fn test_pairs_to_fields() {
        let fields = pairs_to_fields(&[&"user", &"alice", &"retries", &3]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].key(), "retries");
        assert_eq!(fields[1].value(), FieldValue::String("3".to_string()));
    }

    #[test]
    fn test_dangling_key_is_marked_missing() {
        let fields = pairs_to_fields(&[&"user", &"alice", &"orphan"]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].value(), FieldValue::String(MISSING_VALUE.to_string()));
    }
}
