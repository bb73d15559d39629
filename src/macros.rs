//! Logging macros for ergonomic log message formatting.
//!
//! These macros forward to the formatted logger methods (`infof` and
//! friends), so the message is only built when the level is enabled and the
//! caller location points at the macro call site. They accept any logger
//! value: a concrete backend, a `SharedLogger`, or a reference to either.
//!
//! # Examples
//!
//! ```
//! use service_kit::prelude::*;
//! use service_kit::info;
//!
//! let logger = TestLogger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! assert!(logger.has_entry(LogLevel::Info, "Server listening on port 8080"));
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use service_kit::prelude::*;
/// # let logger = TestLogger::new();
/// use service_kit::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// # assert_eq!(logger.len(), 2);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::Logger as _;
        $logger.logf($level, format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use service_kit::prelude::*;
/// # let logger = TestLogger::new();
/// use service_kit::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use service_kit::prelude::*;
/// # let logger = TestLogger::new();
/// use service_kit::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use service_kit::prelude::*;
/// # let logger = TestLogger::new();
/// use service_kit::warn;
/// warn!(logger, "Retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use service_kit::prelude::*;
/// # let logger = TestLogger::new();
/// use service_kit::error;
/// error!(logger, "Database connection failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// Backends that write output terminate the process afterwards.
///
/// # Examples
///
/// ```
/// # use service_kit::prelude::*;
/// # let logger = TestLogger::new();
/// use service_kit::fatal;
/// fatal!(logger, "Critical failure: {}", "disk");
/// # assert_eq!(logger.count_at_level(LogLevel::Fatal), 1);
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::backends::TestLogger;
    use crate::core::{LogLevel, SharedLogger};
    use std::sync::Arc;

    #[test]
    fn test_log_macro() {
        let logger = TestLogger::new();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert!(logger.has_entry(LogLevel::Info, "Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let logger = TestLogger::new();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");

        for level in LogLevel::ALL {
            assert_eq!(logger.count_at_level(level), 1);
        }
        assert!(logger.has_entry(LogLevel::Warn, "Retry 1 of 3"));
    }

    #[test]
    #[deny(unused_imports)]
    fn test_macros_with_shared_logger() {
        let recorder = TestLogger::new();
        let shared: SharedLogger = Arc::new(recorder.clone());
        info!(shared, "via {}", "arc");
        info!(&shared, "via {}", "reference");
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_macro_caller_is_call_site() {
        let logger = TestLogger::new();
        info!(logger, "here");
        assert!(logger.all_entries()[0].caller.file.ends_with("macros.rs"));
    }
}
