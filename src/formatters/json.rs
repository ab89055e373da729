//! JSON renderer
//!
//! Produces one JSON object per entry: the entry's fields plus the reserved
//! `time`, `msg` and `level` keys, followed by a newline. Reserved keys are
//! written last and overwrite fields of the same name.

use crate::core::{Entry, Formatter, LoggerError, Result, TimestampFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELD_KEY_MSG: &str = "msg";
pub const FIELD_KEY_LEVEL: &str = "level";
pub const FIELD_KEY_TIME: &str = "time";

const RESERVED_KEYS: usize = 3;

/// Formats entries as JSON.
///
/// The configuration is plain data and can be loaded with serde; missing
/// keys take their defaults.
///
/// # Example
///
/// ```
/// use rust_field_logger::{Entry, Formatter, JsonFormatter, LogLevel};
///
/// let formatter = JsonFormatter::new().with_disable_timestamp(true);
/// let entry = Entry::new(LogLevel::Info, "hello");
///
/// let bytes = formatter.format(&entry).unwrap();
/// assert_eq!(bytes, b"{\"level\":\"info\",\"msg\":\"hello\"}\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFormatter {
    /// Format of the `time` value; RFC 3339 by default
    pub timestamp_format: TimestampFormat,
    /// Leave out the `time` key
    pub disable_timestamp: bool,
    /// Emit `<`, `>` and `&` verbatim instead of as `\u003c`-style escapes
    pub disable_html_escape: bool,
    /// Indent nested structure by two spaces
    pub pretty_print: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_disable_timestamp(mut self, disable: bool) -> Self {
        self.disable_timestamp = disable;
        self
    }

    #[must_use]
    pub fn with_disable_html_escape(mut self, disable: bool) -> Self {
        self.disable_html_escape = disable;
        self
    }

    #[must_use]
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Append the rendered entry to `buf`.
    ///
    /// `buf` is only extended when rendering succeeds.
    pub fn format_into(&self, entry: &Entry, buf: &mut Vec<u8>) -> Result<()> {
        let mut data = entry
            .data
            .to_json_map(RESERVED_KEYS)
            .map_err(LoggerError::serialization)?;

        if !self.disable_timestamp {
            data.insert(
                FIELD_KEY_TIME.to_string(),
                Value::String(self.timestamp_format.format(&entry.time)?),
            );
        }
        data.insert(FIELD_KEY_MSG.to_string(), Value::String(entry.message.clone()));
        data.insert(
            FIELD_KEY_LEVEL.to_string(),
            Value::String(entry.level.to_str().to_string()),
        );

        let value = Value::Object(data);
        let encoded = if self.pretty_print {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .map_err(LoggerError::serialization)?;

        buf.reserve(encoded.len() + 1);
        self.write_escaped(&encoded, buf);
        buf.push(b'\n');
        Ok(())
    }

    /// Copy encoded JSON into `buf`, escaping HTML-sensitive characters and
    /// the JavaScript line terminators U+2028/U+2029.
    ///
    /// Outside string literals JSON never contains any of these, so a plain
    /// scan over the encoded text only touches string contents.
    fn write_escaped(&self, encoded: &str, buf: &mut Vec<u8>) {
        let escape_html = !self.disable_html_escape;
        let bytes = encoded.as_bytes();
        let mut last = 0;

        for (i, c) in encoded.char_indices() {
            let escaped = match c {
                '<' if escape_html => "\\u003c",
                '>' if escape_html => "\\u003e",
                '&' if escape_html => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            buf.extend_from_slice(&bytes[last..i]);
            buf.extend_from_slice(escaped.as_bytes());
            last = i + c.len_utf8();
        }
        buf.extend_from_slice(&bytes[last..]);
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.format_into(entry, &mut buf)?;
        Ok(buf)
    }
}
