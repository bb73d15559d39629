//! Rendering configuration for the console renderer

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

/// How the caller location is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerFormat {
    /// File name only: `handler.rs:42`
    #[default]
    Short,
    /// Path as recorded by the compiler: `src/api/handler.rs:42`
    Full,
}

/// How inline fields are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFormat {
    /// `(key=value, key2=value2)`
    #[default]
    Parenthesized,
    /// `key=value key2=value2`
    KeyValue,
    /// `{"key":"value","key2":"value2"}`
    Json,
}

/// Snapshot of rendering toggles
///
/// # Examples
///
/// ```
/// use service_kit::core::{FormatConfig, TimestampFormat};
///
/// let config = FormatConfig::new()
///     .with_timestamp_format(TimestampFormat::Rfc3339)
///     .with_show_caller(false)
///     .with_max_field_length(32);
/// assert!(!config.show_caller);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    pub show_timestamp: bool,
    pub show_caller: bool,
    pub show_fields: bool,
    pub show_logger_name: bool,
    pub show_emojis: bool,
    /// Single letter level plus message; overrides every other toggle
    pub minimalist: bool,
    pub timestamp_format: TimestampFormat,
    pub caller_format: CallerFormat,
    pub field_format: FieldFormat,
    /// Truncate rendered field values beyond this many characters; 0 disables
    pub max_field_length: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            show_timestamp: true,
            show_caller: true,
            show_fields: true,
            show_logger_name: true,
            show_emojis: true,
            minimalist: false,
            timestamp_format: TimestampFormat::Clock,
            caller_format: CallerFormat::Short,
            field_format: FieldFormat::Parenthesized,
            max_field_length: 100,
        }
    }
}

impl FormatConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything on: the `beautiful` format
    #[must_use]
    pub fn beautiful() -> Self {
        Self::default()
    }

    /// No icons or caller, shorter values: the `beautifulCompact` format
    #[must_use]
    pub fn compact() -> Self {
        Self {
            show_caller: false,
            show_emojis: false,
            max_field_length: 50,
            ..Self::default()
        }
    }

    /// Level letter and message only: the `beautifulMinimal` format
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            minimalist: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    #[must_use]
    pub fn with_show_caller(mut self, show: bool) -> Self {
        self.show_caller = show;
        self
    }

    #[must_use]
    pub fn with_show_fields(mut self, show: bool) -> Self {
        self.show_fields = show;
        self
    }

    #[must_use]
    pub fn with_show_logger_name(mut self, show: bool) -> Self {
        self.show_logger_name = show;
        self
    }

    #[must_use]
    pub fn with_show_emojis(mut self, show: bool) -> Self {
        self.show_emojis = show;
        self
    }

    #[must_use]
    pub fn with_minimalist(mut self, minimalist: bool) -> Self {
        self.minimalist = minimalist;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_caller_format(mut self, format: CallerFormat) -> Self {
        self.caller_format = format;
        self
    }

    #[must_use]
    pub fn with_field_format(mut self, format: FieldFormat) -> Self {
        self.field_format = format;
        self
    }

    #[must_use]
    pub fn with_max_field_length(mut self, max: usize) -> Self {
        self.max_field_length = max;
        self
    }
}

/// Colors for each part of a rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub enabled: bool,
    pub timestamp: Color,
    pub logger_name: Color,
    pub caller: Color,
    pub message: Color,
    pub field_key: Color,
    pub field_value: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            enabled: true,
            timestamp: Color::BrightBlack,
            logger_name: Color::Magenta,
            caller: Color::BrightBlack,
            message: Color::White,
            field_key: Color::Cyan,
            field_value: Color::BrightWhite,
        }
    }
}

impl ColorScheme {
    /// Scheme that leaves text untouched
    #[must_use]
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn level_color(&self, level: LogLevel) -> Color {
        level.color_code()
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Level labels are bold as well as colored
    pub fn paint_level(&self, text: &str, level: LogLevel) -> String {
        if self.enabled {
            text.color(self.level_color(level)).bold().to_string()
        } else {
            text.to_string()
        }
    }
}
