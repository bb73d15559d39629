//! Error types for the logging facade

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Stage of a colorized write that failed
///
/// The colorizing writer issues up to three writes per call (color prefix,
/// content, reset suffix); the stage tells callers which one broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    Prefix,
    Content,
    Suffix,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStage::Prefix => write!(f, "color prefix"),
            WriteStage::Content => write!(f, "content"),
            WriteStage::Suffix => write!(f, "color suffix"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Write failure with the stage it happened in
    #[error("failed to write {stage}: {source}")]
    WriteStage {
        stage: WriteStage,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Field failed validation
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Registry was initialized twice
    #[error("Logger registry already initialized")]
    AlreadyInitialized,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a stage-labelled write error
    pub fn write_stage(stage: WriteStage, source: std::io::Error) -> Self {
        LoggerError::WriteStage { stage, source }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// The write stage, if this is a stage-labelled write failure
    pub fn stage(&self) -> Option<WriteStage> {
        match self {
            LoggerError::WriteStage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<LoggerError> for std::io::Error {
    fn from(err: LoggerError) -> Self {
        match err {
            LoggerError::IoError(source) => source,
            other => std::io::Error::other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LOG_LEVEL", "unknown level 'loud'");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::write_stage(WriteStage::Suffix, io_err);
        assert_eq!(err.stage(), Some(WriteStage::Suffix));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("LOG_FORMAT", "unknown format 'xml'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LOG_FORMAT: unknown format 'xml'"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::write_stage(WriteStage::Prefix, io_err);
        assert_eq!(err.to_string(), "failed to write color prefix: pipe closed");
    }

    #[test]
    fn test_into_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: std::io::Error = LoggerError::IoError(io_err).into();
        assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);

        let err: std::io::Error = LoggerError::AlreadyInitialized.into();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
    }
}
