//! Timestamp formatting for the `time` key
//!
//! Supports RFC 3339 at second or nanosecond precision, ISO 8601 with
//! milliseconds, and validated custom strftime patterns.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_field_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&time).unwrap(), "2025-01-08T10:30:45Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 at second precision: `2025-01-08T10:30:45Z`
    #[default]
    Rfc3339,

    /// RFC 3339 with as many fractional digits as needed: `2025-01-08T10:30:45.123456Z`
    Rfc3339Nanos,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601Millis,

    /// Custom strftime pattern, see [`TimestampFormat::custom`]
    Custom(String),
}

impl TimestampFormat {
    /// Build a custom format, rejecting patterns chrono cannot render.
    ///
    /// ```
    /// use rust_field_logger::TimestampFormat;
    ///
    /// assert!(TimestampFormat::custom("%d/%b/%Y:%H:%M:%S").is_ok());
    /// assert!(TimestampFormat::custom("%Y-%").is_err());
    /// ```
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime pattern {:?}", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern))
    }

    /// Format a `DateTime<Utc>` according to this format
    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        match self {
            TimestampFormat::Rfc3339 => Ok(datetime.to_rfc3339_opts(SecondsFormat::Secs, true)),
            TimestampFormat::Rfc3339Nanos => {
                Ok(datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            TimestampFormat::Iso8601Millis => {
                Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            }
            TimestampFormat::Custom(pattern) => {
                // Custom may have been built directly or deserialized, so the
                // pattern is not guaranteed valid here.
                let mut out = String::new();
                write!(out, "{}", datetime.format(pattern)).map_err(|_| {
                    LoggerError::Timestamp(format!("cannot render pattern {:?}", pattern))
                })?;
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime()).unwrap();
        assert_eq!(result, "2025-01-08T10:30:45Z");
    }

    #[test]
    fn test_rfc3339_nanos_format() {
        let result = TimestampFormat::Rfc3339Nanos
            .format(&fixed_datetime())
            .unwrap();
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_iso8601_millis_format() {
        let result = TimestampFormat::Iso8601Millis
            .format(&fixed_datetime())
            .unwrap();
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::custom("%Y/%m/%d %H:%M").unwrap();
        assert_eq!(format.format(&fixed_datetime()).unwrap(), "2025/01/08 10:30");
    }

    #[test]
    fn test_invalid_custom_rejected() {
        assert!(matches!(
            TimestampFormat::custom("%Y-%"),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_unvalidated_custom_errors_instead_of_panicking() {
        let format = TimestampFormat::Custom("%Y-%".to_string());
        assert!(matches!(
            format.format(&fixed_datetime()),
            Err(LoggerError::Timestamp(_))
        ));
    }

    #[test]
    fn test_default_is_rfc3339() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Rfc3339);
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str("\"Rfc3339Nanos\"").expect("deserialize");
        assert_eq!(format, TimestampFormat::Rfc3339Nanos);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
