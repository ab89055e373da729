//! Formatter implementations

pub mod json;
pub mod text;

pub use json::{JsonFormatter, FIELD_KEY_LEVEL, FIELD_KEY_MSG, FIELD_KEY_TIME};
pub use text::TextFormatter;

// Re-export the trait alongside its implementations
pub use crate::core::Formatter;
