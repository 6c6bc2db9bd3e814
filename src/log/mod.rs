//! Operational log sink
//!
//! The exception pipeline writes through a [`LogSink`] handed to it rather
//! than a global logger, so tests can capture exactly what was written.

use std::sync::{Arc, Mutex};
use tracing::Level;

/// A destination for leveled, free-form log lines
///
/// Implementations must tolerate concurrent writers; no ordering is
/// guaranteed between lines from different requests.
pub trait LogSink: Send + Sync + 'static {
    fn write(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.write(Level::ERROR, message);
    }

    fn warn(&self, message: &str) {
        self.write(Level::WARN, message);
    }

    fn info(&self, message: &str) {
        self.write(Level::INFO, message);
    }
}

/// Forwards every line to `tracing` at the same level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "primeskills_web", "{}", message),
            Level::WARN => tracing::warn!(target: "primeskills_web", "{}", message),
            Level::INFO => tracing::info!(target: "primeskills_web", "{}", message),
            Level::DEBUG => tracing::debug!(target: "primeskills_web", "{}", message),
            _ => tracing::trace!(target: "primeskills_web", "{}", message),
        }
    }
}

/// Keeps every line in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Only the messages, in write order
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, message)| message).collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: Level, message: &str) {
        let mut lines = self
            .lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push((level, message.to_string()));
    }
}
