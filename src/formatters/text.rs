//! Key-value text renderer
//!
//! Example: `time="2025-01-08T10:30:45Z" level=info msg="Request processed" user=alice`

use super::json::{FIELD_KEY_LEVEL, FIELD_KEY_MSG, FIELD_KEY_TIME};
use crate::core::{Entry, Formatter, LoggerError, Result, TimestampFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Formats entries as a single `key=value` line.
///
/// `time`, `level` and `msg` come first; the entry's fields follow in key
/// order. A field named like a reserved key is written as `fields.<key>`.
/// Keys and values that would not survive as a bare token are quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormatter {
    pub timestamp_format: TimestampFormat,
    pub disable_timestamp: bool,
    /// Colour the level name with ANSI escapes.
    ///
    /// Has no effect unless the `console` feature is enabled.
    pub colors: bool,
}

impl TextFormatter {
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
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn level_text(&self, entry: &Entry) -> String {
        #[cfg(feature = "console")]
        if self.colors {
            use colored::Colorize;
            return entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string();
        }
        entry.level.to_str().to_string()
    }

    /// Rename keys that clash with the reserved ones, then quote if needed
    fn escape_key(key: &str) -> String {
        if matches!(key, FIELD_KEY_TIME | FIELD_KEY_LEVEL | FIELD_KEY_MSG) {
            return format!("fields.{}", key);
        }
        Self::escape_value(key)
    }

    /// Quote a token if it would not survive bare
    fn escape_value(value: &str) -> String {
        let needs_quoting = value.is_empty()
            || value
                .chars()
                .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control());
        if needs_quoting {
            Self::quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_value(value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut parts = Vec::with_capacity(entry.data.len() + 3);

        if !self.disable_timestamp {
            let time = self.timestamp_format.format(&entry.time)?;
            parts.push(format!("{}={}", FIELD_KEY_TIME, Self::quote_value(&time)));
        }
        parts.push(format!("{}={}", FIELD_KEY_LEVEL, self.level_text(entry)));
        parts.push(format!(
            "{}={}",
            FIELD_KEY_MSG,
            Self::quote_value(&entry.message)
        ));

        for (key, value) in &entry.data {
            let rendered = match value.to_json_value().map_err(LoggerError::serialization)? {
                Value::String(s) => Self::escape_value(&s),
                other => Self::escape_value(&other.to_string()),
            };
            parts.push(format!("{}={}", Self::escape_key(key), rendered));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        Ok(line.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use chrono::{TimeZone, Utc};

    fn render(formatter: &TextFormatter, entry: &Entry) -> String {
        String::from_utf8(formatter.format(entry).unwrap()).unwrap()
    }

    #[test]
    fn test_text_layout() {
        let entry = Entry::new(LogLevel::Info, "Request processed")
            .with_time(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap())
            .with_data(Fields::new().with_field("user", "alice").with_field("count", 5));

        assert_eq!(
            render(&TextFormatter::new(), &entry),
            "time=\"2025-01-08T10:30:45Z\" level=info msg=\"Request processed\" count=5 user=alice\n"
        );
    }

    #[test]
    fn test_values_with_special_chars_are_quoted() {
        let entry = Entry::new(LogLevel::Debug, "q").with_data(
            Fields::new()
                .with_field("query", "SELECT * FROM users WHERE id=1")
                .with_field("empty", ""),
        );

        let out = render(&TextFormatter::new().with_disable_timestamp(true), &entry);
        assert!(out.starts_with("level=debug msg=\"q\""));
        assert!(out.contains("query=\"SELECT * FROM users WHERE id=1\""));
        assert!(out.contains("empty=\"\""));
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let entry = Entry::new(LogLevel::Warn, "line one\nline two");
        let out = render(&TextFormatter::new().with_disable_timestamp(true), &entry);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("msg=\"line one\\nline two\""));
    }

    #[test]
    fn test_reserved_fields_are_prefixed() {
        let entry = Entry::new(LogLevel::Error, "real").with_data(
            Fields::new()
                .with_field("msg", "spoofed")
                .with_field("level", "debug"),
        );
        let out = render(&TextFormatter::new().with_disable_timestamp(true), &entry);
        assert_eq!(
            out,
            "level=error msg=\"real\" fields.level=debug fields.msg=spoofed\n"
        );
    }

    #[test]
    fn test_keys_are_kept_distinct() {
        let entry = Entry::new(LogLevel::Info, "x").with_data(
            Fields::new()
                .with_field("a b", 1)
                .with_field("ab", 2)
                .with_field("!!", 3)
                .with_field("", 4)
                .with_field("k=v", 5),
        );
        let out = render(&TextFormatter::new().with_disable_timestamp(true), &entry);
        assert_eq!(
            out,
            "level=info msg=\"x\" \"\"=4 !!=3 \"a b\"=1 ab=2 \"k=v\"=5\n"
        );
    }

    #[cfg(not(feature = "console"))]
    #[test]
    fn test_colors_ignored_without_console() {
        let entry = Entry::new(LogLevel::Warn, "plain");
        let out = render(
            &TextFormatter::new().with_disable_timestamp(true).with_colors(true),
            &entry,
        );
        assert_eq!(out, "level=warn msg=\"plain\"\n");
    }

    #[test]
    fn test_unserializable_field_errors() {
        let entry = Entry::new(LogLevel::Info, "x")
            .with_data(Fields::new().with_field("ratio", f64::NAN));
        assert!(matches!(
            TextFormatter::new().format(&entry),
            Err(LoggerError::Serialization(_))
        ));
    }
}
