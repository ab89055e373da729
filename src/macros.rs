//! Logging macros for ergonomic log message formatting.
//!
//! Each level macro takes either a format string, which logs through the
//! process-wide default logger, or a logger expression followed by the format
//! string. Arguments are formatted lazily through `format_args!` and never
//! allocated when the level is filtered.
//!
//! # Examples
//!
//! ```
//! use rust_field_logger::prelude::*;
//! use rust_field_logger::info;
//!
//! let logger = Logger::builder().output(MemorySink::new()).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger.with_field("port", port), "Server listening on port {}", port);
//!
//! // Default logger
//! info!("cache warmed in {} ms", 12);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use rust_field_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().level(LogLevel::Debug).output(MemorySink::new()).build();
/// use rust_field_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::debugf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use rust_field_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::infof(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use rust_field_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::warnf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use rust_field_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::errorf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use crate::formatters::JsonFormatter;
    use crate::sinks::MemorySink;

    fn capture() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .level(LogLevel::Debug)
            .formatter(JsonFormatter::new().with_disable_timestamp(true))
            .output(sink.clone())
            .build();
        (logger, sink)
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = capture();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);

        assert_eq!(
            sink.lines(),
            [
                r#"{"level":"info","msg":"Test message"}"#,
                r#"{"level":"info","msg":"Formatted: 42"}"#,
            ]
        );
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = capture();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let levels: Vec<String> = sink
            .lines()
            .iter()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["level"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(levels, ["debug", "info", "warn", "error"]);
    }

    #[test]
    fn test_macro_on_derived_handle() {
        let (logger, sink) = capture();
        info!(logger.with_field("user", "alice"), "login from {}", "10.0.0.1");

        assert_eq!(
            sink.contents(),
            "{\"level\":\"info\",\"msg\":\"login from 10.0.0.1\",\"user\":\"alice\"}\n"
        );
    }

    #[test]
    fn test_filtered_macro_writes_nothing() {
        let (logger, sink) = capture();
        logger.set_level(LogLevel::Warn);
        debug!(logger, "hidden {}", 1);
        info!(logger, "hidden");
        assert!(sink.contents().is_empty());
    }
}
