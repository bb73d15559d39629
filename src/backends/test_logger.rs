//! In-memory recording logger for tests

use crate::core::{
    join_name, merge_fields, Backend, CallerLocation, Field, LogEntry, LogLevel, Logger, Result,
    SharedLogger,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Records every call instead of writing it
///
/// Loggers derived through `with`, `named` or `with_context` append to the
/// same entry list, so assertions can be made on the root handle. `Fatal`
/// calls are recorded and never terminate.
///
/// # Example
///
/// ```
/// use service_kit::prelude::*;
///
/// let logger = TestLogger::new();
/// logger.warn("disk almost full", &[Field::uint8("percent", 93)]);
///
/// assert_eq!(logger.count_at_level(LogLevel::Warn), 1);
/// assert!(logger.has_entry(LogLevel::Warn, "disk almost full"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestLogger {
    entries: Arc<RwLock<Vec<LogEntry>>>,
    fields: Vec<Field>,
    name: String,
}

impl TestLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_entries(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    pub fn entries_at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn count_at_level(&self, level: LogLevel) -> usize {
        self.entries.read().iter().filter(|e| e.level == level).count()
    }

    /// Whether an entry with exactly this level and message was recorded
    pub fn has_entry(&self, level: LogLevel, message: &str) -> bool {
        self.entries
            .read()
            .iter()
            .any(|e| e.level == level && e.message == message)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn derive(&self, fields: Vec<Field>, name: String) -> TestLogger {
        TestLogger {
            entries: Arc::clone(&self.entries),
            fields,
            name,
        }
    }
}

impl Logger for TestLogger {
    fn log(&self, level: LogLevel, message: &str, fields: &[Field], caller: Option<CallerLocation>) {
        let entry = LogEntry::new(level, message)
            .with_logger_name(self.name.clone())
            .with_caller(caller)
            .with_fields(&merge_fields(&self.fields, fields));
        self.entries.write().push(entry);
    }

    fn with(&self, fields: &[Field]) -> SharedLogger {
        Arc::new(self.derive(merge_fields(&self.fields, fields), self.name.clone()))
    }

    fn named(&self, name: &str) -> SharedLogger {
        Arc::new(self.derive(self.fields.clone(), join_name(&self.name, name)))
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> Backend {
        Backend::Test
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, RequestContext};

    #[test]
    fn test_queries() {
        let logger = TestLogger::new();
        logger.debug("a", &[]);
        logger.info("b", &[]);
        logger.info("c", &[]);
        logger.fatal("d", &[]);

        assert_eq!(logger.len(), 4);
        assert_eq!(logger.count_at_level(LogLevel::Info), 2);
        assert_eq!(logger.entries_at_level(LogLevel::Fatal)[0].message, "d");
        assert!(logger.has_entry(LogLevel::Debug, "a"));
        assert!(!logger.has_entry(LogLevel::Error, "a"));

        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_multiline_message_recorded_as_logged() {
        let logger = TestLogger::new();
        logger.warn("line one\nline two", &[]);

        assert!(logger.has_entry(LogLevel::Warn, "line one\nline two"));
        assert_eq!(logger.all_entries()[0].message, "line one\nline two");
    }

    #[test]
    fn test_derived_loggers_share_entries() {
        let logger = TestLogger::new();
        let ctx = RequestContext::new().with_request_id("req-7");
        logger
            .named("jobs")
            .with(&[Field::string("queue", "emails")])
            .with_context(&ctx)
            .error("retry exhausted", &[Field::int64("attempts", 5)]);

        let entries = logger.all_entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.logger_name, "jobs");
        assert_eq!(entry.field_count(), 3);
        assert_eq!(entry.field("request_id"), Some(&FieldValue::String("req-7".to_string())));
        assert_eq!(entry.field("attempts"), Some(&FieldValue::Int64(5)));
    }

    #[test]
    fn test_caller_recorded() {
        let logger = TestLogger::new();
        logger.infof(format_args!("{} items", 3));

        let entry = &logger.all_entries()[0];
        assert_eq!(entry.message, "3 items");
        assert!(entry.caller.file.ends_with("test_logger.rs"));
    }
}
