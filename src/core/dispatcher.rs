//! Level-filtered dispatch engine shared by logger handles
//!
//! A `Dispatcher` owns the engine-wide state: the level threshold, the
//! formatter, the output sink and the registered hooks. Every
//! [`Logger`](crate::Logger) handle derived from the same root points at one
//! dispatcher, so changing any of these is visible to all of them.

use super::{
    entry::Entry,
    error::Result,
    fields::Fields,
    formatter::Formatter,
    hook::Hook,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::formatters::JsonFormatter;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Destination for rendered bytes
pub type Sink = Box<dyn Write + Send>;

pub struct Dispatcher {
    level: RwLock<LogLevel>,
    formatter: RwLock<Arc<dyn Formatter>>,
    output: Mutex<Sink>,
    hooks: RwLock<Vec<Arc<dyn Hook>>>,
    metrics: LoggerMetrics,
}

impl Dispatcher {
    /// Level `Info`, JSON output to stderr, no hooks
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: RwLock::new(LogLevel::Info),
            formatter: RwLock::new(Arc::new(JsonFormatter::default())),
            output: Mutex::new(Box::new(io::stderr())),
            hooks: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    #[inline]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level <= *self.level.read()
    }

    pub fn set_output<W: Write + Send + 'static>(&self, output: W) {
        self.set_sink(Box::new(output));
    }

    /// Swap the sink, returning the previous one
    pub fn set_sink(&self, sink: Sink) -> Sink {
        std::mem::replace(&mut *self.output.lock(), sink)
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        self.set_shared_formatter(Arc::new(formatter));
    }

    pub fn set_shared_formatter(&self, formatter: Arc<dyn Formatter>) {
        *self.formatter.write() = formatter;
    }

    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.formatter.read())
    }

    pub fn add_hook<H: Hook + 'static>(&self, hook: H) {
        self.add_shared_hook(Arc::new(hook));
    }

    pub fn add_shared_hook(&self, hook: Arc<dyn Hook>) {
        self.hooks.write().push(hook);
    }

    /// Replace every hook at once, returning the old set
    pub fn replace_hooks(&self, hooks: Vec<Arc<dyn Hook>>) -> Vec<Arc<dyn Hook>> {
        std::mem::replace(&mut *self.hooks.write(), hooks)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush the current sink.
    ///
    /// Each entry is already flushed after it is written; this is for sinks
    /// that were written to directly or swapped in with buffered data.
    pub fn flush(&self) -> Result<()> {
        self.output.lock().flush()?;
        Ok(())
    }

    /// Filter, fire hooks, format and write one entry.
    ///
    /// The message is only rendered once the level check passes. Failures are
    /// reported on stderr and counted; they never reach the caller.
    pub fn log(
        &self,
        level: LogLevel,
        data: &Fields,
        time: Option<DateTime<Utc>>,
        message: fmt::Arguments<'_>,
    ) {
        if !self.is_level_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let mut entry = Entry {
            time: time.unwrap_or_else(Utc::now),
            level,
            message: message.to_string(),
            data: data.clone(),
        };

        self.fire_hooks(&mut entry);

        let formatter = self.formatter();
        let bytes = match formatter.format(&entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to obtain reader, {}", e);
                self.metrics.record_dropped();
                return;
            }
        };

        let mut output = self.output.lock();
        match output.write_all(&bytes).and_then(|()| output.flush()) {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to write to log, {}", e);
                self.metrics.record_dropped();
            }
        }
    }

    /// Run matching hooks in registration order.
    ///
    /// A failing or panicking hook is reported and skipped; the remaining
    /// hooks and the write still happen.
    fn fire_hooks(&self, entry: &mut Entry) {
        // Snapshot so a hook that logs through this dispatcher cannot deadlock.
        let hooks: Vec<Arc<dyn Hook>> = self.hooks.read().clone();
        let level = entry.level;

        for hook in hooks.iter().filter(|h| h.levels().contains(&level)) {
            let fire_result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hook.fire(entry)));

            match fire_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Failed to fire hook: {}", e);
                    self.metrics.record_hook_failure();
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Hook '{}' panicked: {}. Other hooks continue to function.",
                        hook.name(),
                        panic_message(panic_info.as_ref())
                    );
                    self.metrics.record_hook_failure();
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("level", &self.level())
            .field("hooks", &self.hooks.read().len())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
