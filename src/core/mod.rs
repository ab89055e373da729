//! Core logger types and traits

pub mod dispatcher;
pub mod entry;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod hook;
pub mod latency;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use dispatcher::{Dispatcher, Sink};
pub use entry::Entry;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields, SerializeField};
pub use formatter::Formatter;
pub use hook::Hook;
pub use latency::LatencyUnit;
pub use log_level::{parse_level, LogLevel};
pub use logger::{Logger, LoggerBuilder, ERROR_KEY, LATENCY_KEY};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
