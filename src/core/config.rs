//! Logger configuration and construction
//!
//! | variable             | values                                                    | default       |
//! |----------------------|-----------------------------------------------------------|---------------|
//! | `LOG_LEVEL`          | debug, info, warn, error, fatal                           | `info`        |
//! | `LOG_FORMAT`         | console, json, beautiful, beautifulCompact, beautifulMinimal | `beautiful` |
//! | `ENVIRONMENT`        | development, production (falls back to `APP_ENV`)          | `development` |
//! | `LOG_SHOW_CALLER`    | bool                                                      | `true`        |
//! | `LOG_SHOW_TIMESTAMP` | bool                                                      | `true`        |
//! | `LOG_MINIMALIST`     | bool                                                      | `false`       |

use super::{
    error::{LoggerError, Result},
    format_config::FormatConfig,
    log_level::LogLevel,
    logger::SharedLogger,
};
use crate::backends::{BeautifulLogger, SinkLogger};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

/// Output format selected at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogFormat {
    Console,
    Json,
    #[default]
    Beautiful,
    BeautifulCompact,
    BeautifulMinimal,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Console => "console",
            LogFormat::Json => "json",
            LogFormat::Beautiful => "beautiful",
            LogFormat::BeautifulCompact => "beautifulCompact",
            LogFormat::BeautifulMinimal => "beautifulMinimal",
        }
    }

    pub fn is_beautiful(&self) -> bool {
        matches!(
            self,
            LogFormat::Beautiful | LogFormat::BeautifulCompact | LogFormat::BeautifulMinimal
        )
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    /// Case-insensitive; `_` and `-` separators are ignored
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "console" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            "beautiful" => Ok(LogFormat::Beautiful),
            "beautifulcompact" => Ok(LogFormat::BeautifulCompact),
            "beautifulminimal" => Ok(LogFormat::BeautifulMinimal),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Settings for [`build_logger`]
///
/// # Example
///
/// ```
/// use service_kit::core::{Environment, LogFormat, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{"level": "warn", "format": "beautifulCompact", "minimalist": false}"#,
/// ).unwrap();
/// assert_eq!(config.format, LogFormat::BeautifulCompact);
/// assert_eq!(config.environment, Environment::Development);
/// assert!(config.show_caller);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub environment: Environment,
    pub show_caller: bool,
    pub show_timestamp: bool,
    pub minimalist: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Beautiful,
            environment: Environment::Development,
            show_caller: true,
            show_timestamp: true,
            minimalist: false,
        }
    }
}

impl LoggerConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset or empty keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("LOG_LEVEL") {
            config.level = value.parse().map_err(|e| LoggerError::config("LOG_LEVEL", e))?;
        }
        if let Some(value) = get("LOG_FORMAT") {
            config.format = value.parse().map_err(|e| LoggerError::config("LOG_FORMAT", e))?;
        }
        if let Some(value) = get("ENVIRONMENT").or_else(|| get("APP_ENV")) {
            config.environment = value
                .parse()
                .map_err(|e| LoggerError::config("ENVIRONMENT", e))?;
        }
        if let Some(value) = get("LOG_SHOW_CALLER") {
            config.show_caller = parse_bool("LOG_SHOW_CALLER", &value)?;
        }
        if let Some(value) = get("LOG_SHOW_TIMESTAMP") {
            config.show_timestamp = parse_bool("LOG_SHOW_TIMESTAMP", &value)?;
        }
        if let Some(value) = get("LOG_MINIMALIST") {
            config.minimalist = parse_bool("LOG_MINIMALIST", &value)?;
        }

        Ok(config)
    }

    /// Whether the JSON sink is selected
    pub fn uses_json(&self) -> bool {
        self.environment == Environment::Production || self.format == LogFormat::Json
    }

    /// Renderer settings for the beautiful formats
    pub fn format_config(&self) -> FormatConfig {
        let preset = match self.format {
            LogFormat::BeautifulCompact => FormatConfig::compact(),
            LogFormat::BeautifulMinimal => FormatConfig::minimal(),
            _ => FormatConfig::beautiful(),
        };
        let minimalist = preset.minimalist || self.minimalist;
        let show_caller = preset.show_caller && self.show_caller;
        preset
            .with_show_timestamp(self.show_timestamp)
            .with_show_caller(show_caller)
            .with_minimalist(minimalist)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::config(key, format!("expected a boolean, got {:?}", value))),
    }
}

/// Build the logger described by `config`, writing to stdout
pub fn build_logger(config: &LoggerConfig) -> Result<SharedLogger> {
    build_logger_with_writer(config, io::stdout())
}

/// Build the logger described by `config`, writing to `writer`
///
/// Production or `json` selects the JSON sink, `console` the colored console
/// sink, and the beautiful formats the renderer with the matching preset.
pub fn build_logger_with_writer<W>(config: &LoggerConfig, writer: W) -> Result<SharedLogger>
where
    W: Write + Send + 'static,
{
    let logger: SharedLogger = match config.format {
        _ if config.uses_json() => Arc::new(
            SinkLogger::production(config.level, writer)
                .with_show_caller(config.show_caller)
                .with_show_timestamp(config.show_timestamp),
        ),
        LogFormat::Console => Arc::new(
            SinkLogger::development(config.level, writer)
                .with_show_caller(config.show_caller)
                .with_show_timestamp(config.show_timestamp),
        ),
        _ => Arc::new(
            BeautifulLogger::builder()
                .level(config.level)
                .format_config(config.format_config())
                .writer(writer)
                .build(),
        ),
    };
    Ok(logger)
}
