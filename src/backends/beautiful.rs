//! Beautiful console renderer
//!
//! Renders each call as one line assembled from optional parts:
//!
//! ```text
//! timestamp icon LEVEL  [name] file:line message (key=value, key2=value2)
//! ```
//!
//! The minimalist mode prints only the level letter and the message.

use super::writer::{stdout_writer, SharedWriter};
use crate::core::{
    join_name, Backend, CallerLocation, ColorScheme, Field, FieldFormat, FieldValue,
    FormatConfig, LogEntry, LogLevel, Logger, Result, SharedLogger, Terminator,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::sync::Arc;

/// Marker appended to truncated field values
pub const TRUNCATION_MARKER: &str = "...";

/// Width the level label is padded to
const LEVEL_WIDTH: usize = 6;

/// Colorized single-line console logger
///
/// Derived loggers (`with`, `named`, `with_context`) get their own copy of
/// the field map and share the writer, color scheme and format config.
pub struct BeautifulLogger {
    level: LogLevel,
    name: String,
    fields: Arc<RwLock<HashMap<String, Field>>>,
    color_scheme: Arc<ColorScheme>,
    config: FormatConfig,
    writer: SharedWriter,
    terminator: Terminator,
}

impl BeautifulLogger {
    /// Logger writing to stdout with the given threshold and format
    pub fn new(level: LogLevel, config: FormatConfig) -> Self {
        Self::builder().level(level).format_config(config).build()
    }

    pub fn builder() -> BeautifulLoggerBuilder {
        BeautifulLoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format_config(&self) -> &FormatConfig {
        &self.config
    }

    fn derive(&self, name: String, fields: HashMap<String, Field>, config: FormatConfig) -> Self {
        Self {
            level: self.level,
            name,
            fields: Arc::new(RwLock::new(fields)),
            color_scheme: Arc::clone(&self.color_scheme),
            config,
            writer: Arc::clone(&self.writer),
            terminator: self.terminator.clone(),
        }
    }

    fn snapshot_fields(&self) -> HashMap<String, Field> {
        self.fields.read().clone()
    }

    /// Same logger with a different format config
    #[must_use]
    pub fn with_format_config(&self, config: FormatConfig) -> BeautifulLogger {
        self.derive(self.name.clone(), self.snapshot_fields(), config)
    }

    /// Concrete-typed variant of [`Logger::with`]
    #[must_use]
    pub fn with_fields(&self, fields: &[Field]) -> BeautifulLogger {
        let mut merged = self.snapshot_fields();
        for field in fields.iter().filter(|f| !f.is_skip()) {
            merged.insert(field.key().to_string(), field.clone());
        }
        self.derive(self.name.clone(), merged, self.config.clone())
    }

    /// Concrete-typed variant of [`Logger::named`]
    #[must_use]
    pub fn with_name(&self, name: &str) -> BeautifulLogger {
        self.derive(join_name(&self.name, name), self.snapshot_fields(), self.config.clone())
    }

    /// Accumulated fields merged with per-call fields, per-call winning, sorted by key
    fn merged_fields(&self, fields: &[Field]) -> Vec<Field> {
        let mut merged: BTreeMap<String, Field> = {
            let accumulated = self.fields.read();
            accumulated
                .iter()
                .map(|(k, f)| (k.clone(), f.clone()))
                .collect()
        };
        for field in fields.iter().filter(|f| !f.is_skip()) {
            merged.insert(field.key().to_string(), field.clone());
        }
        merged.into_values().collect()
    }

    /// Render one line without the trailing newline
    pub fn render(&self, level: LogLevel, message: &str, fields: &[Field], caller: Option<CallerLocation>) -> String {
        let entry = LogEntry::new(level, message)
            .with_logger_name(self.name.clone())
            .with_caller(caller);
        if self.config.minimalist {
            return self.render_minimal(&entry);
        }
        let entry = entry.with_fields(&self.merged_fields(fields));
        self.render_entry(&entry)
    }

    fn render_minimal(&self, entry: &LogEntry) -> String {
        let scheme = &self.color_scheme;
        format!(
            "{} {}",
            scheme.paint_level(&entry.level.letter().to_string(), entry.level),
            scheme.paint(&escape_message(&entry.message), scheme.message)
        )
    }

    fn render_entry(&self, entry: &LogEntry) -> String {
        let scheme = &self.color_scheme;
        let config = &self.config;
        let mut parts: Vec<String> = Vec::with_capacity(7);

        if config.show_timestamp {
            let timestamp = config.timestamp_format.format(&entry.timestamp);
            parts.push(scheme.paint(&timestamp, scheme.timestamp));
        }
        if config.show_emojis {
            parts.push(entry.level.icon().to_string());
        }
        let label = format!("{:<width$}", entry.level.to_str(), width = LEVEL_WIDTH);
        parts.push(scheme.paint_level(&label, entry.level));
        if config.show_logger_name && !entry.logger_name.is_empty() {
            parts.push(scheme.paint(&format!("[{}]", entry.logger_name), scheme.logger_name));
        }
        if config.show_caller {
            parts.push(scheme.paint(&entry.caller.format(config.caller_format), scheme.caller));
        }
        parts.push(scheme.paint(&escape_message(&entry.message), scheme.message));
        if config.show_fields && !entry.fields.is_empty() {
            parts.push(self.render_fields(&entry.fields));
        }

        parts.join(" ")
    }

    fn render_fields(&self, fields: &[(String, FieldValue)]) -> String {
        let scheme = &self.color_scheme;
        let max = self.config.max_field_length;

        match self.config.field_format {
            FieldFormat::Json => {
                let object: serde_json::Map<String, serde_json::Value> = fields
                    .iter()
                    .map(|(key, value)| {
                        let rendered = value.to_string();
                        let json = if max > 0 && rendered.chars().count() > max {
                            serde_json::Value::String(truncate(&rendered, max))
                        } else {
                            value.to_json_value()
                        };
                        (key.clone(), json)
                    })
                    .collect();
                scheme.paint(&serde_json::Value::Object(object).to_string(), scheme.field_value)
            }
            FieldFormat::Parenthesized | FieldFormat::KeyValue => {
                let pairs: Vec<String> = fields
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{}={}",
                            scheme.paint(key, scheme.field_key),
                            scheme.paint(&truncate(&value.to_string(), max), scheme.field_value)
                        )
                    })
                    .collect();
                if self.config.field_format == FieldFormat::Parenthesized {
                    format!("({})", pairs.join(", "))
                } else {
                    pairs.join(" ")
                }
            }
        }
    }
}

/// Escape line breaks and tabs so one call always renders as one line
pub fn escape_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Cut `value` to `max` characters plus a marker; `max == 0` disables truncation
pub fn truncate(value: &str, max: usize) -> String {
    if max == 0 || value.chars().count() <= max {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

impl Logger for BeautifulLogger {
    fn log(&self, level: LogLevel, message: &str, fields: &[Field], caller: Option<CallerLocation>) {
        if !self.enabled(level) {
            return;
        }

        let line = self.render(level, message, fields, caller);
        {
            let mut writer = self.writer.lock();
            if let Err(e) = writeln!(writer, "{}", line) {
                eprintln!("[LOGGER ERROR] Beautiful renderer write failed: {}", e);
            }
        }

        if level == LogLevel::Fatal {
            let _ = self.sync();
            self.terminator.terminate();
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level == LogLevel::Fatal || level >= self.level
    }

    fn with(&self, fields: &[Field]) -> SharedLogger {
        Arc::new(self.with_fields(fields))
    }

    fn named(&self, name: &str) -> SharedLogger {
        Arc::new(self.with_name(name))
    }

    fn sync(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn backend(&self) -> Backend {
        Backend::Beautiful
    }
}

/// Builder for constructing a BeautifulLogger with a fluent API
///
/// # Example
/// ```
/// use service_kit::prelude::*;
///
/// let buffer = BufferWriter::new();
/// let logger = BeautifulLogger::builder()
///     .level(LogLevel::Debug)
///     .name("api")
///     .format_config(FormatConfig::compact().with_show_timestamp(false))
///     .color_scheme(ColorScheme::plain())
///     .writer(buffer.clone())
///     .build();
///
/// logger.info("ready", &[]);
/// assert_eq!(buffer.lines(), vec!["INFO   [api] ready".to_string()]);
/// ```
pub struct BeautifulLoggerBuilder {
    level: LogLevel,
    name: String,
    fields: Vec<Field>,
    config: FormatConfig,
    color_scheme: ColorScheme,
    writer: Option<SharedWriter>,
    terminator: Terminator,
}

impl BeautifulLoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            name: String::new(),
            fields: Vec::new(),
            config: FormatConfig::beautiful(),
            color_scheme: ColorScheme::default(),
            writer: None,
            terminator: Terminator::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fields attached to every entry
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(super::writer::shared_writer(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_writer(mut self, writer: SharedWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn build(self) -> BeautifulLogger {
        // built before the logger is shared, so no lock is needed
        let fields: HashMap<String, Field> = self
            .fields
            .into_iter()
            .filter(|f| !f.is_skip())
            .map(|f| (f.key().to_string(), f))
            .collect();

        BeautifulLogger {
            level: self.level,
            name: self.name,
            fields: Arc::new(RwLock::new(fields)),
            color_scheme: Arc::new(self.color_scheme),
            config: self.config,
            writer: self.writer.unwrap_or_else(stdout_writer),
            terminator: self.terminator,
        }
    }
}

impl Default for BeautifulLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::BufferWriter;
    use crate::core::RequestContext;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn plain_logger(config: FormatConfig) -> (BeautifulLogger, BufferWriter) {
        let buffer = BufferWriter::new();
        let logger = BeautifulLogger::builder()
            .level(LogLevel::Debug)
            .format_config(config)
            .color_scheme(ColorScheme::plain())
            .writer(buffer.clone())
            .terminator(Terminator::new(|_| {}))
            .build();
        (logger, buffer)
    }

    fn bare_config() -> FormatConfig {
        FormatConfig::new()
            .with_show_timestamp(false)
            .with_show_caller(false)
            .with_show_emojis(false)
    }

    #[test]
    fn test_line_format() {
        let (logger, buffer) = plain_logger(bare_config());
        logger.info("user created", &[Field::string("id", "42")]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("INFO   user created (id=42)"));
    }

    #[test]
    fn test_level_padding() {
        let (logger, buffer) = plain_logger(bare_config());
        logger.error("failed", &[]);
        logger.debug("detail", &[]);
        assert_eq!(buffer.lines(), vec!["ERROR  failed", "DEBUG  detail"]);
    }

    #[test]
    fn test_level_gate() {
        let buffer = BufferWriter::new();
        let logger = BeautifulLogger::builder()
            .level(LogLevel::Warn)
            .format_config(bare_config())
            .color_scheme(ColorScheme::plain())
            .writer(buffer.clone())
            .build();

        logger.info("dropped", &[]);
        logger.warn("kept", &[]);
        assert_eq!(buffer.lines(), vec!["WARN   kept"]);
    }

    #[test]
    fn test_minimalist_overrides_everything() {
        let (logger, buffer) = plain_logger(FormatConfig::beautiful().with_minimalist(true));
        logger.with(&[Field::string("k", "v")]).warn("careful", &[Field::int64("n", 1)]);
        assert_eq!(buffer.lines(), vec!["W careful"]);
    }

    #[test]
    fn test_control_characters_escaped_in_line() {
        let (logger, buffer) = plain_logger(bare_config());
        logger.info("one\ntwo\tthree\r", &[]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("INFO   one\\ntwo\\tthree\\r"));
    }

    #[test]
    fn test_name_and_caller() {
        let (logger, buffer) = plain_logger(bare_config().with_show_caller(true));
        let logger = logger.with_name("api").with_name("users");
        logger.info("listed", &[]);

        let line = &buffer.lines()[0];
        assert!(line.starts_with("INFO   [api.users] beautiful.rs:"));
        assert!(line.ends_with(" listed"));
    }

    #[test]
    fn test_unknown_caller() {
        let (logger, buffer) = plain_logger(bare_config().with_show_caller(true));
        logger.log(LogLevel::Info, "no location", &[], None);
        assert_eq!(buffer.lines(), vec!["INFO   unknown:0 no location"]);
    }

    #[test]
    fn test_fields_sorted_and_call_wins() {
        let (logger, buffer) = plain_logger(bare_config());
        let logger = logger.with_fields(&[Field::string("zone", "eu"), Field::string("id", "1")]);
        logger.info("merge", &[Field::string("id", "2"), Field::Skip]);
        assert_eq!(buffer.lines(), vec!["INFO   merge (id=2, zone=eu)"]);
    }

    #[test]
    fn test_skipped_fields_never_render() {
        let (logger, buffer) = plain_logger(bare_config());
        logger.info(
            "quiet",
            &[Field::conditional(false, "secret", "x"), Field::nullable::<String>("maybe", None)],
        );
        assert_eq!(buffer.lines(), vec!["INFO   quiet"]);
    }

    #[test]
    fn test_truncation() {
        let (logger, buffer) = plain_logger(bare_config().with_max_field_length(5));
        logger.info("long", &[Field::string("body", "abcdefghij")]);
        assert_eq!(buffer.lines(), vec!["INFO   long (body=abcde...)"]);
        assert_eq!(truncate("short", 0), "short");
        assert_eq!(truncate("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_key_value_and_json_field_formats() {
        let (logger, buffer) = plain_logger(bare_config().with_field_format(FieldFormat::KeyValue));
        logger.info("kv", &[Field::int64("a", 1), Field::bool("b", true)]);

        let json_logger = logger.with_format_config(bare_config().with_field_format(FieldFormat::Json));
        json_logger.info("json", &[Field::int64("a", 1)]);

        assert_eq!(buffer.lines(), vec!["INFO   kv a=1 b=true", "INFO   json {\"a\":1}"]);
    }

    #[test]
    fn test_timestamp_and_icon_parts() {
        let config = FormatConfig::new()
            .with_show_caller(false)
            .with_timestamp_format(crate::core::TimestampFormat::Layout("TS".to_string()));
        let (logger, buffer) = plain_logger(config);
        logger.warn("hot", &[]);
        assert_eq!(buffer.lines(), vec![format!("TS {} WARN   hot", LogLevel::Warn.icon())]);
    }

    #[test]
    fn test_with_context_adds_ids() {
        let (logger, buffer) = plain_logger(bare_config());
        let ctx = RequestContext::new().with_request_id("r-1").with_user_id("u-2");
        logger.with_context(&ctx).info("handled", &[]);
        assert_eq!(buffer.lines(), vec!["INFO   handled (request_id=r-1, user_id=u-2)"]);
    }

    #[test]
    fn test_with_does_not_mutate_receiver() {
        let (logger, buffer) = plain_logger(bare_config());
        let _child = logger.with(&[Field::string("child", "yes")]);
        logger.info("parent", &[]);
        assert_eq!(buffer.lines(), vec!["INFO   parent"]);
    }

    #[test]
    fn test_fatal_terminates_after_write() {
        let buffer = BufferWriter::new();
        let exited = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&exited);
        let observed = buffer.clone();
        let logger = BeautifulLogger::builder()
            .level(LogLevel::Error)
            .format_config(bare_config())
            .color_scheme(ColorScheme::plain())
            .writer(buffer.clone())
            .terminator(Terminator::new(move |_| {
                assert!(!observed.is_empty());
                flag.store(true, Ordering::SeqCst);
            }))
            .build();

        logger.fatal("shutting down", &[]);
        assert!(exited.load(Ordering::SeqCst));
        assert_eq!(buffer.lines(), vec!["FATAL  shutting down"]);
    }

    #[test]
    fn test_sugar_stringifies_pairs() {
        let (logger, buffer) = plain_logger(bare_config());
        logger.sugar().infow("sugared", &[&"count", &3]);
        assert_eq!(buffer.lines(), vec!["INFO   sugared (count=3)"]);
    }
}
