//! # Service Kit
//!
//! Logging and request validation building blocks for backend services.
//!
//! ## Features
//!
//! - **Typed fields**: eager, lazy, custom and pre-encoded fields with
//!   lossless numeric round trips
//! - **Pluggable backends**: colorized single-line renderer, JSON and console
//!   sinks, a no-op logger and an in-memory recorder for tests
//! - **Request context**: logger, request, trace and user ids carried on an
//!   immutable context chain
//! - **Timing**: performance monitors that pick the level from elapsed time
//! - **Validation**: tag-driven requiredness and naming, format validators,
//!   and an HTTP 422 error aggregate
//!
//! ## Example
//!
//! ```
//! use service_kit::prelude::*;
//!
//! let buffer = BufferWriter::new();
//! let logger = BeautifulLogger::builder()
//!     .format_config(
//!         FormatConfig::new()
//!             .with_show_timestamp(false)
//!             .with_show_caller(false)
//!             .with_show_emojis(false),
//!     )
//!     .color_scheme(ColorScheme::plain())
//!     .writer(buffer.clone())
//!     .build();
//!
//! logger.info("user created", &[Field::string("id", "42")]);
//! assert!(buffer.contents().ends_with("INFO   user created (id=42)\n"));
//! ```

pub mod backends;
pub mod core;
pub mod macros;
pub mod validation;

pub mod prelude {
    pub use crate::backends::{
        BeautifulLogger, BeautifulLoggerBuilder, BufferWriter, ColorWriter, NoopLogger, SinkLogger,
        TestLogger,
    };
    pub use crate::core::{
        build_logger, context_fields, logger_from_context, merge_fields, track, track_result,
        Backend, ColorScheme, Environment, Field, FieldFormat, FieldValue, FormatConfig, LogEntry,
        LogFormat, LogLevel, Logger, LoggerConfig, LoggerError, LoggerRegistry, PerformanceMonitor,
        RequestContext, Result, ScopedTimer, SharedLogger, SugaredLogger, Terminator,
        TimestampFormat,
    };
    pub use crate::validation::{ValidationError, ValidationErrorExt};
}

pub use backends::{BeautifulLogger, NoopLogger, SinkLogger, TestLogger};
pub use core::{
    build_logger, Field, FieldValue, LogLevel, Logger, LoggerConfig, LoggerError, LoggerRegistry,
    RequestContext, Result, SharedLogger,
};
pub use validation::{ValidationError, ValidationErrorExt};
