//! Display units for the derived `latency` field

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);

/// Unit a latency is expressed in before it is attached to a logger.
///
/// `Other` carries any selector that is not one of the named units; latencies
/// normalized with it keep their raw nanosecond count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Other(Duration),
}

impl LatencyUnit {
    /// Express `latency` in this unit.
    ///
    /// Micro- and millisecond values are whole numbers (truncated); second,
    /// minute and hour values keep their fraction.
    ///
    /// ```
    /// use rust_field_logger::LatencyUnit;
    /// use std::time::Duration;
    ///
    /// assert_eq!(LatencyUnit::Minute.normalize(Duration::from_secs(90)), 1.5);
    /// assert_eq!(LatencyUnit::Millisecond.normalize(Duration::from_micros(2500)), 2.0);
    /// ```
    pub fn normalize(self, latency: Duration) -> f64 {
        match self {
            LatencyUnit::Nanosecond => latency.as_nanos() as f64,
            LatencyUnit::Microsecond => latency.as_micros() as f64,
            LatencyUnit::Millisecond => latency.as_millis() as f64,
            LatencyUnit::Second => latency.as_secs_f64(),
            LatencyUnit::Minute => latency.as_secs_f64() / 60.0,
            LatencyUnit::Hour => latency.as_secs_f64() / 3600.0,
            LatencyUnit::Other(_) => latency.as_nanos() as f64,
        }
    }
}

impl From<Duration> for LatencyUnit {
    fn from(unit: Duration) -> Self {
        match unit {
            d if d == Duration::from_nanos(1) => LatencyUnit::Nanosecond,
            d if d == Duration::from_micros(1) => LatencyUnit::Microsecond,
            d if d == Duration::from_millis(1) => LatencyUnit::Millisecond,
            d if d == Duration::from_secs(1) => LatencyUnit::Second,
            d if d == MINUTE => LatencyUnit::Minute,
            d if d == HOUR => LatencyUnit::Hour,
            other => LatencyUnit::Other(other),
        }
    }
}

impl FromStr for LatencyUnit {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ns" => Ok(LatencyUnit::Nanosecond),
            "us" | "µs" => Ok(LatencyUnit::Microsecond),
            "ms" => Ok(LatencyUnit::Millisecond),
            "s" => Ok(LatencyUnit::Second),
            "m" => Ok(LatencyUnit::Minute),
            "h" => Ok(LatencyUnit::Hour),
            _ => Err(LoggerError::config(
                "LatencyUnit",
                format!("unknown unit {:?}", s),
            )),
        }
    }
}
