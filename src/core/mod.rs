//! Core logging model: fields, levels, the logger trait and its helpers

pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod field_groups;
pub mod format_config;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod output_format;
pub mod perf;
pub mod registry;
pub mod sugar;
pub mod timestamp;

pub use config::{build_logger, build_logger_with_writer, Environment, LogFormat, LoggerConfig};
pub use context::{
    context_fields, logger_from_context, logger_from_context_or, request_id_from_context,
    trace_id_from_context, user_id_from_context, RequestContext, REQUEST_ID_KEY, TRACE_ID_KEY,
    USER_ID_KEY,
};
pub use error::{LoggerError, Result, WriteStage};
pub use field::{merge_fields, validate_field, EncodedField, Field, FieldKind, FieldValue};
pub use field_groups::{
    component, database_fields, http_client_fields, http_request_fields, latency_ms, request_id,
    service_fields, trace_id, user_id, FieldGroup,
};
pub use format_config::{CallerFormat, ColorScheme, FieldFormat, FormatConfig};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{join_name, Backend, CallerLocation, Logger, SharedLogger, Terminator};
pub use output_format::{SinkColumns, SinkEncoder};
pub use perf::{level_for_elapsed, track, track_result, PerformanceMonitor, ScopedTimer};
pub use registry::LoggerRegistry;
pub use sugar::{pairs_to_fields, SugaredLogger, MISSING_VALUE};
pub use timestamp::TimestampFormat;
