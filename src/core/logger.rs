//! Logger capability shared by every backend

use super::{
    context::{context_fields, RequestContext},
    error::Result,
    field::Field,
    log_level::LogLevel,
    sugar::SugaredLogger,
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Logger handle passed around the application
pub type SharedLogger = Arc<dyn Logger>;

/// Source location of a log call
pub type CallerLocation = &'static Location<'static>;

/// Concrete backend behind a `Logger`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Beautiful,
    Json,
    Console,
    Noop,
    Test,
}

/// Structured logging capability
///
/// Backends implement [`Logger::log`] plus the enrichment methods; the
/// leveled and formatted methods are provided on top of `log` and record the
/// caller location through `#[track_caller]`.
///
/// # Example
///
/// ```
/// use service_kit::prelude::*;
///
/// let logger = TestLogger::new();
/// let scoped = logger.named("users").with(&[Field::string("tenant", "acme")]);
/// scoped.info("user created", &[Field::string("id", "42")]);
///
/// assert!(logger.has_entry(LogLevel::Info, "user created"));
/// ```
pub trait Logger: Send + Sync {
    /// Write one entry. `Fatal` entries terminate the process afterwards on
    /// backends that write output.
    fn log(&self, level: LogLevel, message: &str, fields: &[Field], caller: Option<CallerLocation>);

    /// Whether an entry at `level` would be written
    fn enabled(&self, level: LogLevel) -> bool {
        let _ = level;
        true
    }

    /// New logger with `fields` merged into its enrichment set
    fn with(&self, fields: &[Field]) -> SharedLogger;

    /// New logger whose name is this name dot-joined with `name`
    fn named(&self, name: &str) -> SharedLogger;

    /// New logger enriched with the request, trace and user ids of `ctx`
    fn with_context(&self, ctx: &RequestContext) -> SharedLogger {
        let fields = context_fields(Some(ctx));
        self.with(&fields)
    }

    /// Key/value companion of this logger
    fn sugar(&self) -> SugaredLogger {
        SugaredLogger::new(self.with(&[]))
    }

    /// Flush buffered output
    fn sync(&self) -> Result<()>;

    fn backend(&self) -> Backend;

    #[track_caller]
    fn debug(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Debug, message, fields, Some(Location::caller()));
    }

    #[track_caller]
    fn info(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Info, message, fields, Some(Location::caller()));
    }

    #[track_caller]
    fn warn(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Warn, message, fields, Some(Location::caller()));
    }

    #[track_caller]
    fn error(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Error, message, fields, Some(Location::caller()));
    }

    #[track_caller]
    fn fatal(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Fatal, message, fields, Some(Location::caller()));
    }

    #[track_caller]
    fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if level == LogLevel::Fatal || self.enabled(level) {
            self.log(level, &args.to_string(), &[], Some(Location::caller()));
        }
    }

    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Fatal, args);
    }
}

/// Join a parent logger name with a child segment
pub fn join_name(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}.{}", parent, child),
    }
}

/// Process termination used after `Fatal` entries
///
/// Backends hold one of these so tests can swap the real `exit` for a stub.
#[derive(Clone)]
pub struct Terminator {
    exit: Arc<dyn Fn(i32) + Send + Sync>,
}

impl Terminator {
    /// Exit code used after a fatal entry
    pub const FATAL_EXIT_CODE: i32 = 1;

    pub fn new<F>(exit: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        Self {
            exit: Arc::new(exit),
        }
    }

    /// Terminator that really exits the process
    pub fn process_exit() -> Self {
        Self::new(|code| std::process::exit(code))
    }

    pub fn terminate(&self) {
        (self.exit)(Self::FATAL_EXIT_CODE);
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Self::process_exit()
    }
}

impl fmt::Debug for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminator").finish_non_exhaustive()
    }
}
