//! In-memory [`Log`] backend.
use std::sync::Mutex;

use tracing::Level;

use super::render::{EventKind, Style, render};
use super::types::{ActionEntry, ActionStatus, Log};

/// Captures the lines a run would print, uncoloured, instead of printing
/// them.
///
/// Debug messages are kept apart so callers can assert on exactly what a
/// user would see.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
    debug: Mutex<Vec<String>>,
    actions: Mutex<Vec<ActionEntry>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Console lines captured so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Debug lines captured so far.
    #[must_use]
    pub fn debug_lines(&self) -> Vec<String> {
        self.debug.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Recorded action results.
    #[must_use]
    pub fn entries(&self) -> Vec<ActionEntry> {
        self.actions.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    fn push(&self, kind: EventKind, level: Level, msg: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push(render(kind, level, msg, Style::Plain));
        }
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push(EventKind::Header, Level::INFO, msg);
    }

    fn info(&self, msg: &str) {
        self.push(EventKind::Status, Level::INFO, msg);
    }

    fn debug(&self, msg: &str) {
        if let Ok(mut guard) = self.debug.lock() {
            guard.push(msg.to_string());
        }
    }

    fn warn(&self, msg: &str) {
        self.push(EventKind::Message, Level::WARN, msg);
    }

    fn error(&self, msg: &str) {
        self.push(EventKind::Message, Level::ERROR, msg);
    }

    fn dry_run(&self, msg: &str) {
        self.push(EventKind::DryRun, Level::INFO, msg);
    }

    fn record_action(&self, program: &str, description: &str, status: ActionStatus) {
        if let Ok(mut guard) = self.actions.lock() {
            guard.push(ActionEntry {
                program: program.to_string(),
                description: description.to_string(),
                status,
            });
        }
    }
}
