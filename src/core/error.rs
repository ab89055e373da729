//! Error types for the field logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A field value could not be encoded
    #[error("failed to marshal fields to JSON, {0}")]
    Serialization(#[source] serde_json::Error),

    /// Level name matched no known severity
    #[error("not a valid log level: {0:?}")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Timestamp could not be rendered with the configured pattern
    #[error("Timestamp error: {0}")]
    Timestamp(String),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hook failed while handling an entry
    #[error("Hook '{name}' failed: {message}")]
    Hook { name: String, message: String },
}

impl LoggerError {
    /// Wrap an encoder failure
    pub fn serialization(source: serde_json::Error) -> Self {
        LoggerError::Serialization(source)
    }

    /// Create an unknown-level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(level.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a hook error
    pub fn hook(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Hook {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LoggerError {
    fn from(err: serde_json::Error) -> Self {
        LoggerError::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    #[test]
    fn test_serialization_error_prefix() {
        let err = LoggerError::serialization(serde_json::Error::custom("unsupported value: NaN"));
        assert_eq!(
            err.to_string(),
            "failed to marshal fields to JSON, unsupported value: NaN"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("bogus");
        assert_eq!(err.to_string(), "not a valid log level: \"bogus\"");

        let err = LoggerError::config("TimestampFormat", "invalid pattern");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for TimestampFormat: invalid pattern"
        );

        let err = LoggerError::hook("audit", "sink closed");
        assert_eq!(err.to_string(), "Hook 'audit' failed: sink closed");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
    }
}
