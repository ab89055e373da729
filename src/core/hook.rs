//! Hook trait for per-entry notifications

use super::{entry::Entry, error::Result, log_level::LogLevel};

/// Callback fired by the dispatcher before an entry is formatted.
///
/// Hooks may edit the entry's data; the edited entry is what gets rendered.
///
/// # Example
///
/// ```
/// use rust_field_logger::{Entry, Hook, LogLevel, Result};
///
/// struct Tag;
///
/// impl Hook for Tag {
///     fn levels(&self) -> &[LogLevel] {
///         &[LogLevel::Error]
///     }
///
///     fn fire(&self, entry: &mut Entry) -> Result<()> {
///         entry.data.insert("alert", true);
///         Ok(())
///     }
/// }
/// ```
pub trait Hook: Send + Sync {
    /// Levels this hook fires for
    fn levels(&self) -> &[LogLevel] {
        &LogLevel::ALL
    }

    fn fire(&self, entry: &mut Entry) -> Result<()>;

    fn name(&self) -> &str {
        "hook"
    }
}
