//! Process-wide default logger
//!
//! The default [`Logger`] is built on first use and lives for the rest of the
//! process. Every function here delegates to it, so configuring it through
//! [`set_output`], [`set_level`], [`set_formatter`] or [`add_hook`] affects
//! all handles derived with [`with_field`], [`with_fields`] or
//! [`with_latency`].

use crate::core::{FieldValue, Fields, Formatter, Hook, LatencyUnit, LogLevel, Logger};
use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The shared default logger, created on first call
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

pub fn set_output<W: Write + Send + 'static>(output: W) {
    default_logger().set_output(output);
}

pub fn set_level(level: LogLevel) {
    default_logger().set_level(level);
}

pub fn set_formatter<F: Formatter + 'static>(formatter: F) {
    default_logger().set_formatter(formatter);
}

pub fn add_hook<H: Hook + 'static>(hook: H) {
    default_logger().add_hook(hook);
}

pub fn with_field<K, V>(key: K, value: V) -> Logger
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    default_logger().with_field(key, value)
}

pub fn with_fields(fields: Fields) -> Logger {
    default_logger().with_fields(fields)
}

pub fn with_latency(latency: Duration, unit: impl Into<LatencyUnit>) -> Logger {
    default_logger().with_latency(latency, unit)
}

pub fn debug(message: impl fmt::Display) {
    default_logger().debug(message);
}

pub fn info(message: impl fmt::Display) {
    default_logger().info(message);
}

pub fn warn(message: impl fmt::Display) {
    default_logger().warn(message);
}

pub fn error(message: impl fmt::Display) {
    default_logger().error(message);
}

pub fn debugf(args: fmt::Arguments<'_>) {
    default_logger().debugf(args);
}

pub fn infof(args: fmt::Arguments<'_>) {
    default_logger().infof(args);
}

pub fn warnf(args: fmt::Arguments<'_>) {
    default_logger().warnf(args);
}

pub fn errorf(args: fmt::Arguments<'_>) {
    default_logger().errorf(args);
}

pub fn log_fmt(level: LogLevel, args: fmt::Arguments<'_>) {
    default_logger().log_fmt(level, args);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_logger_is_initialised_once() {
        let a = default_logger();
        let b = default_logger();
        assert!(std::ptr::eq(a, b));
        assert!(Arc::ptr_eq(a.dispatcher(), b.dispatcher()));
    }

    #[test]
    fn test_derived_handles_share_default_dispatcher() {
        let derived = with_field("component", "global-test");
        assert!(Arc::ptr_eq(derived.dispatcher(), default_logger().dispatcher()));
        assert!(default_logger().fields().is_empty());

        let timed = with_latency(Duration::from_secs(90), LatencyUnit::Minute);
        assert_eq!(timed.fields().get("latency"), Some(&FieldValue::Float(1.5)));
    }
}
