//! Production and development sink logger
//!
//! - production: JSON lines straight to the sink
//! - development: tab-separated console lines through a [`ColorWriter`]

use super::color_writer::ColorWriter;
use super::writer::{shared_writer, SharedWriter};
use crate::core::{
    join_name, merge_fields, Backend, CallerLocation, Field, LogEntry, LogLevel, Logger, Result,
    SharedLogger, SinkColumns, SinkEncoder, Terminator,
};
use std::io::Write;
use std::sync::Arc;

/// Logger encoding entries with a [`SinkEncoder`]
///
/// # Example
///
/// ```
/// use service_kit::prelude::*;
///
/// let buffer = BufferWriter::new();
/// let logger = SinkLogger::production(LogLevel::Info, buffer.clone());
/// logger.info("request processed", &[Field::int64("status", 200)]);
///
/// let line: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
/// assert_eq!(line["level"], "info");
/// assert_eq!(line["status"], 200);
/// ```
#[derive(Clone)]
pub struct SinkLogger {
    level: LogLevel,
    name: String,
    fields: Vec<Field>,
    encoder: SinkEncoder,
    columns: SinkColumns,
    writer: SharedWriter,
    terminator: Terminator,
    backend: Backend,
}

impl SinkLogger {
    /// JSON lines to `writer`
    pub fn production<W: Write + Send + 'static>(level: LogLevel, writer: W) -> Self {
        Self::with_encoder(level, SinkEncoder::Json, shared_writer(writer), Backend::Json)
    }

    /// Colored console lines to `writer`
    pub fn development<W: Write + Send + 'static>(level: LogLevel, writer: W) -> Self {
        Self::with_encoder(
            level,
            SinkEncoder::Console,
            shared_writer(ColorWriter::new(writer)),
            Backend::Console,
        )
    }

    fn with_encoder(level: LogLevel, encoder: SinkEncoder, writer: SharedWriter, backend: Backend) -> Self {
        Self {
            level,
            name: String::new(),
            fields: Vec::new(),
            encoder,
            columns: SinkColumns::default(),
            writer,
            terminator: Terminator::default(),
            backend,
        }
    }

    #[must_use]
    pub fn with_show_caller(mut self, show: bool) -> Self {
        self.columns = self.columns.with_caller(show);
        self
    }

    #[must_use]
    pub fn with_show_timestamp(mut self, show: bool) -> Self {
        self.columns = self.columns.with_timestamp(show);
        self
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn encoder(&self) -> SinkEncoder {
        self.encoder
    }

    /// Encoded line for one call, without trailing newline
    pub fn encode(&self, level: LogLevel, message: &str, fields: &[Field], caller: Option<CallerLocation>) -> String {
        let entry = LogEntry::new(level, message)
            .with_logger_name(self.name.clone())
            .with_caller(caller)
            .with_fields(&merge_fields(&self.fields, fields));
        self.encoder.encode(&entry, self.columns)
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock();
        // the newline goes separately so the color writer wraps only the content
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }
}

impl Logger for SinkLogger {
    fn log(&self, level: LogLevel, message: &str, fields: &[Field], caller: Option<CallerLocation>) {
        if !self.enabled(level) {
            return;
        }

        let line = self.encode(level, message, fields, caller);
        if let Err(e) = self.write_line(&line) {
            eprintln!("[LOGGER ERROR] Sink write failed: {}", e);
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
        let mut derived = self.clone();
        derived.fields = merge_fields(&self.fields, fields);
        Arc::new(derived)
    }

    fn named(&self, name: &str) -> SharedLogger {
        let mut derived = self.clone();
        derived.name = join_name(&self.name, name);
        Arc::new(derived)
    }

    fn sync(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn backend(&self) -> Backend {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{color_writer::color_prefix, BufferWriter, RESET};
    use std::sync::atomic::{AtomicI32, Ordering};

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_production_json_line() {
        let buffer = BufferWriter::new();
        let logger = SinkLogger::production(LogLevel::Info, buffer.clone());
        logger
            .named("api")
            .with(&[Field::string("service", "billing")])
            .warn("slow query", &[Field::int64("ms", 1500)]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let line = parse(&lines[0]);
        assert_eq!(line["level"], "warn");
        assert_eq!(line["logger"], "api");
        assert_eq!(line["msg"], "slow query");
        assert_eq!(line["service"], "billing");
        assert_eq!(line["ms"], 1500);
        assert!(line["caller"].as_str().unwrap().starts_with("sink.rs:"));
    }

    #[test]
    fn test_level_gate_and_hidden_caller() {
        let buffer = BufferWriter::new();
        let logger = SinkLogger::production(LogLevel::Error, buffer.clone()).with_show_caller(false);
        logger.info("dropped", &[]);
        logger.error("kept", &[]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(parse(&lines[0]).get("caller").is_none());
    }

    #[test]
    fn test_call_fields_override_accumulated() {
        let buffer = BufferWriter::new();
        let logger = SinkLogger::production(LogLevel::Debug, buffer.clone());
        logger
            .with(&[Field::string("stage", "parse")])
            .debug("step", &[Field::string("stage", "render")]);

        assert_eq!(parse(&buffer.lines()[0])["stage"], "render");
    }

    #[test]
    fn test_development_line_is_colored() {
        let buffer = BufferWriter::new();
        let logger = SinkLogger::development(LogLevel::Info, buffer.clone()).with_show_caller(false);
        logger.error("boom", &[]);

        let contents = buffer.contents();
        assert!(contents.starts_with(&color_prefix(LogLevel::Error)));
        assert!(contents.ends_with(&format!(" ERROR boom{}\n", RESET)));
        assert!(!contents.contains('\t'));
    }

    #[test]
    fn test_fatal_exits_with_code_one() {
        let buffer = BufferWriter::new();
        let code = Arc::new(AtomicI32::new(0));
        let seen = Arc::clone(&code);
        let logger = SinkLogger::production(LogLevel::Info, buffer.clone())
            .with_terminator(Terminator::new(move |c| seen.store(c, Ordering::SeqCst)));

        logger.fatal("unrecoverable", &[]);
        assert_eq!(code.load(Ordering::SeqCst), 1);
        assert_eq!(parse(&buffer.lines()[0])["level"], "fatal");
    }

    #[test]
    fn test_backend_kind() {
        assert_eq!(SinkLogger::production(LogLevel::Info, Vec::new()).backend(), Backend::Json);
        assert_eq!(SinkLogger::development(LogLevel::Info, Vec::new()).backend(), Backend::Console);
    }
}
