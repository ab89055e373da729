//! Log level definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an entry, ordered by ascending verbosity.
///
/// A threshold lets an entry through when `entry_level <= threshold`, so a
/// dispatcher set to `Info` emits `Error`, `Warn` and `Info` but not `Debug`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Every level, least verbose first
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Lowercase name as it appears in rendered output
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Error => Red,
            LogLevel::Warn => Yellow,
            LogLevel::Info => Blue,
            LogLevel::Debug => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

/// Parse a level name, case-insensitively.
///
/// ```
/// use rust_field_logger::{parse_level, LogLevel};
///
/// assert_eq!(parse_level("info").unwrap(), LogLevel::Info);
/// assert!(parse_level("bogus").is_err());
/// ```
pub fn parse_level(level: &str) -> Result<LogLevel> {
    level.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_parse_known_levels() {
        assert_eq!(parse_level("info").unwrap(), LogLevel::Info);
        assert_eq!(parse_level("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(parse_level("warning").unwrap(), LogLevel::Warn);
        assert_eq!(parse_level("Error").unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_parse_unknown_level() {
        let err = parse_level("bogus").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(ref s) if s == "bogus"));
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LogLevel::Debug).unwrap();
        assert_eq!(json, "\"debug\"");
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
    }
}
