//! # Rust Field Logger
//!
//! A structured logging facade: contextual key/value fields carried by cheap
//! logger handles, latency normalization, and JSON rendering.
//!
//! ## Features
//!
//! - **Copy-on-derive context**: `with_field`, `with_fields` and
//!   `with_latency` return new handles and never touch the receiver
//! - **JSON output**: reserved `time`, `msg` and `level` keys, optional HTML
//!   escaping and pretty printing
//! - **Shared engine**: every handle derived from one root shares its level,
//!   formatter, output and hooks
//! - **Default instance**: free functions in [`global`] and the level macros
//!
//! ## Example
//!
//! ```
//! use rust_field_logger::prelude::*;
//! use std::time::Duration;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .formatter(JsonFormatter::new().with_disable_timestamp(true))
//!     .output(sink.clone())
//!     .build();
//!
//! logger
//!     .with_field("route", "/health")
//!     .with_latency(Duration::from_micros(2500), LatencyUnit::Millisecond)
//!     .info("served");
//!
//! assert_eq!(
//!     sink.contents(),
//!     "{\"latency\":2.0,\"level\":\"info\",\"msg\":\"served\",\"route\":\"/health\"}\n"
//! );
//! ```

pub mod core;
pub mod formatters;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Entry, FieldValue, Fields, Formatter, Hook, LatencyUnit, LogLevel, Logger, LoggerBuilder,
        LoggerError, Result, TimestampFormat,
    };
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::sinks::{FileSink, MemorySink};
}

pub use crate::core::{
    parse_level, Dispatcher, Entry, FieldValue, Fields, Formatter, Hook, LatencyUnit, LogLevel,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, SerializeField, Sink,
    TimestampFormat, ERROR_KEY, LATENCY_KEY,
};
pub use formatters::{JsonFormatter, TextFormatter};
pub use global::default_logger;
pub use sinks::{FileSink, MemorySink};
