//! Log entry structure

use super::field::{Field, FieldValue};
use super::format_config::CallerFormat;
use super::log_level::LogLevel;
use super::logger::CallerLocation;
use chrono::{DateTime, Utc};
use std::fmt;

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    /// Placeholder used when no location was captured
    pub const UNKNOWN: Caller = Caller {
        file: "unknown",
        line: 0,
    };

    pub fn from_location(location: Option<CallerLocation>) -> Self {
        location
            .map(|loc| Caller {
                file: loc.file(),
                line: loc.line(),
            })
            .unwrap_or(Self::UNKNOWN)
    }

    pub fn format(&self, format: CallerFormat) -> String {
        let file = match format {
            CallerFormat::Full => self.file,
            CallerFormat::Short => self.file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(self.file),
        };
        format!("{}:{}", file, self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(CallerFormat::Short))
    }
}

/// One resolved log call
///
/// Fields are read exactly once when the entry is built, so a lazy field
/// shows the same value everywhere the entry is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub logger_name: String,
    pub timestamp: DateTime<Utc>,
    pub caller: Caller,
    pub fields: Vec<(String, FieldValue)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
            logger_name: String::new(),
            timestamp: Utc::now(),
            caller: Caller::UNKNOWN,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: Option<CallerLocation>) -> Self {
        self.caller = Caller::from_location(caller);
        self
    }

    /// Resolve `fields` into the entry, dropping `Skip` fields
    #[must_use]
    pub fn with_fields(mut self, fields: &[Field]) -> Self {
        self.fields = fields
            .iter()
            .filter(|f| !f.is_skip())
            .map(|f| (f.key().to_string(), f.value()))
            .collect();
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
