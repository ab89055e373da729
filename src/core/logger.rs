//! Field-context logger handles
//!
//! A [`Logger`] pairs a shared [`Dispatcher`] with its own snapshot of
//! structured fields. Deriving a handle (`with_field`, `with_fields`,
//! `with_latency`, ...) copies the fields into a new map and leaves the
//! receiver untouched, so handles can be passed around and specialised freely.

use super::{
    dispatcher::{Dispatcher, Sink},
    fields::{FieldValue, Fields},
    formatter::Formatter,
    hook::Hook,
    latency::LatencyUnit,
    log_level::LogLevel,
};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Key of the field set by [`Logger::with_latency`]
pub const LATENCY_KEY: &str = "latency";

/// Key of the field set by [`Logger::with_error`]
pub const ERROR_KEY: &str = "error";

/// A handle onto a shared dispatcher carrying accumulated fields.
///
/// Cloning is cheap apart from the field map; all clones and derivations share
/// the same dispatcher.
///
/// # Example
///
/// ```
/// use rust_field_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::new();
/// let request = logger
///     .with_field("request_id", "abc-123")
///     .with_latency(Duration::from_millis(42), LatencyUnit::Millisecond);
///
/// assert!(logger.fields().is_empty());
/// assert_eq!(request.fields().len(), 2);
/// request.info("request served");
/// ```
#[derive(Clone)]
pub struct Logger {
    dispatcher: Arc<Dispatcher>,
    fields: Fields,
    time: Option<DateTime<Utc>>,
}

impl Logger {
    /// Empty handle bound to a fresh dispatcher
    #[must_use]
    pub fn new() -> Self {
        Self::from_dispatcher(Arc::new(Dispatcher::new()))
    }

    /// Empty handle bound to an existing dispatcher
    #[must_use]
    pub fn from_dispatcher(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            fields: Fields::new(),
            time: None,
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Entry time pinned by [`Logger::with_time`], if any
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Derive a handle with one more field
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_fields(Fields::new().with_field(key, value))
    }

    /// Derive a handle whose fields are this handle's overlaid with `fields`.
    ///
    /// Keys present in both take the value from `fields`.
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Logger {
        Logger {
            dispatcher: Arc::clone(&self.dispatcher),
            fields: self.fields.merged(&fields),
            time: self.time,
        }
    }

    /// Derive a handle with a `latency` field expressed in `unit`.
    ///
    /// `unit` may be a [`LatencyUnit`] or a `Duration` selector such as
    /// `Duration::from_secs(1)`; selectors that name no unit keep the raw
    /// nanosecond count.
    #[must_use]
    pub fn with_latency(&self, latency: Duration, unit: impl Into<LatencyUnit>) -> Logger {
        self.with_field(LATENCY_KEY, unit.into().normalize(latency))
    }

    /// Derive a handle with an `error` field holding `err`'s message
    #[must_use]
    pub fn with_error(&self, err: &dyn std::error::Error) -> Logger {
        self.with_field(ERROR_KEY, err.to_string())
    }

    /// Derive a handle whose entries carry `time` instead of the current time
    #[must_use]
    pub fn with_time(&self, time: DateTime<Utc>) -> Logger {
        Logger {
            dispatcher: Arc::clone(&self.dispatcher),
            fields: self.fields.clone(),
            time: Some(time),
        }
    }

    pub fn set_output<W: Write + Send + 'static>(&self, output: W) {
        self.dispatcher.set_output(output);
    }

    pub fn set_level(&self, level: LogLevel) {
        self.dispatcher.set_level(level);
    }

    pub fn level(&self) -> LogLevel {
        self.dispatcher.level()
    }

    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        self.dispatcher.is_level_enabled(level)
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        self.dispatcher.set_formatter(formatter);
    }

    pub fn add_hook<H: Hook + 'static>(&self, hook: H) {
        self.dispatcher.add_hook(hook);
    }

    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        self.log_fmt(level, format_args!("{}", message));
    }

    /// Log pre-formatted arguments; see the `log!` family of macros
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.dispatcher.log(level, &self.fields, self.time, args);
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[inline]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warn, args);
    }

    #[inline]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("fields", &self.fields)
            .field("time", &self.time)
            .field("level", &self.level())
            .finish()
    }
}

/// Builder for a [`Logger`] on a freshly configured dispatcher
///
/// # Example
/// ```
/// use rust_field_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .formatter(JsonFormatter::new().with_disable_timestamp(true))
///     .output(sink.clone())
///     .build();
///
/// logger.debug("ready");
/// assert_eq!(sink.contents(), "{\"level\":\"debug\",\"msg\":\"ready\"}\n");
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    formatter: Option<Arc<dyn Formatter>>,
    output: Option<Sink>,
    hooks: Vec<Arc<dyn Hook>>,
    fields: Fields,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            formatter: None,
            output: None,
            hooks: Vec::new(),
            fields: Fields::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(mut self, output: W) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Register a hook; hooks fire in the order they were added
    #[must_use = "builder methods return a new value"]
    pub fn hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Fields carried by the root handle
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    pub fn build(self) -> Logger {
        let dispatcher = Dispatcher::new();
        dispatcher.set_level(self.level);
        if let Some(formatter) = self.formatter {
            dispatcher.set_shared_formatter(formatter);
        }
        if let Some(output) = self.output {
            dispatcher.set_sink(output);
        }
        for hook in self.hooks {
            dispatcher.add_shared_hook(hook);
        }

        Logger::from_dispatcher(Arc::new(dispatcher)).with_fields(self.fields)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
