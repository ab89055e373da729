//! Formatter trait for turning entries into output bytes

use super::{entry::Entry, error::Result};

pub trait Formatter: Send + Sync {
    /// Render `entry`; on error nothing is produced.
    fn format(&self, entry: &Entry) -> Result<Vec<u8>>;
}
