//! Timestamp formatting utilities
//!
//! Provides the timestamp formats understood by the console renderer.
//! Unknown format names are treated as strftime layouts, and a layout that
//! chrono cannot render falls back to the layout text itself.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use service_kit::core::TimestampFormat;
///
/// let format: TimestampFormat = "unix_ms".parse().unwrap();
/// assert_eq!(format, TimestampFormat::UnixMillis);
///
/// // anything else is a strftime layout
/// let format: TimestampFormat = "%Y/%m/%d".parse().unwrap();
/// assert_eq!(format, TimestampFormat::Layout("%Y/%m/%d".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Wall clock only: `10:30:45`
    #[default]
    Clock,

    /// Date and time: `2025-01-08 10:30:45`
    DateTime,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// RFC 3339 format: `2025-01-08T10:30:45Z`
    Rfc3339,

    /// Custom strftime layout
    Layout(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Clock => datetime.format("%H:%M:%S").to_string(),
            TimestampFormat::DateTime => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Layout(layout) => {
                let mut out = String::new();
                // chrono reports bad layouts through fmt::Error
                if write!(out, "{}", datetime.format(layout)).is_err() {
                    return layout.clone();
                }
                out
            }
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

impl FromStr for TimestampFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "clock" | "time" | "15:04:05" => TimestampFormat::Clock,
            "datetime" | "2006-01-02 15:04:05" => TimestampFormat::DateTime,
            "unix" => TimestampFormat::Unix,
            "unix_ms" | "unixmilli" | "unix_millis" => TimestampFormat::UnixMillis,
            "rfc3339" => TimestampFormat::Rfc3339,
            _ => TimestampFormat::Layout(s.to_string()),
        })
    }
}
