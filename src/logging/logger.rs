//! [`Log`] backend on top of `tracing`.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::render::EventKind;
use super::types::{ActionEntry, ActionStatus, Log, summarize};

/// Sends every line through `tracing`, tagged with its [`EventKind`], and
/// collects action results for the run summary.
///
/// What reaches the console and the log file is decided by the subscriber
/// from [`init_subscriber`](super::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    actions: Mutex<Vec<ActionEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`, writing to the default per-command log file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(super::file::log_file_path(command))
    }

    /// Logger whose run log lives at `log_file`.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Where this run's log file is written, if anywhere.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Action results recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<ActionEntry> {
        self.actions.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Debug-level summary of the recorded actions and the log location.
    pub fn log_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }
        self.debug(&summarize(&entries));
        if let Some(path) = self.log_path().filter(|p| p.exists()) {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(kind = EventKind::Header.as_str(), "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!(kind = EventKind::Status.as_str(), "{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(kind = EventKind::DryRun.as_str(), "{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
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

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::file::FileLayer;
    use std::fs;
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    /// A logger whose events land in a log file under a fresh temp dir,
    /// through a subscriber scoped to the current thread.
    fn file_logger() -> (Logger, tempfile::TempDir, tracing::subscriber::DefaultGuard) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("test.log");
        let layer = FileLayer::create(&path, "test").unwrap();
        let subscriber = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
        let guard = tracing::subscriber::set_default(subscriber);
        (Logger::with_log_file(Some(path)), tmp, guard)
    }

    fn contents(log: &Logger) -> String {
        fs::read_to_string(log.log_path().unwrap()).unwrap()
    }

    #[test]
    fn file_lines_match_the_console_layout() {
        let (log, _tmp, _guard) = file_logger();
        log.stage("zsh");
        log.info("Creating ~/.zshrc");
        log.dry_run("Creating ~/.zshenv");
        log.warn("careful");
        log.error("zsh: copy ~/.zshrc failed: source missing");
        log.debug("loaded 1 program(s)");

        let text = contents(&log);
        let body: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split_once(' ').map_or(l, |(_, rest)| rest))
            .collect();
        assert_eq!(
            body,
            [
                "==> zsh",
                "  Creating ~/.zshrc",
                "  [DRY RUN] Creating ~/.zshenv",
                "WARN  careful",
                "ERROR zsh: copy ~/.zshrc failed: source missing",
                "  debug: loaded 1 program(s)",
            ]
        );
    }

    #[test]
    fn record_action_via_trait() {
        let log = Logger::with_log_file(None);
        let sink: &dyn Log = &log;
        sink.record_action("vim", "Creating ~/.vimrc", ActionStatus::Applied);
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].program, "vim");
        assert_eq!(entries[0].status, ActionStatus::Applied);
    }

    #[test]
    fn summary_goes_to_debug_with_log_path() {
        let (log, _tmp, _guard) = file_logger();
        log.record_action("vim", "Skipping ~/.vimrc", ActionStatus::Skipped);
        log.log_summary();
        let text = contents(&log);
        assert!(text.contains("debug: 1 actions: 0 applied, 1 skipped"), "{text}");
        assert!(text.contains("debug: log: "), "{text}");
    }

    #[test]
    fn empty_run_has_no_summary() {
        let (log, _tmp, _guard) = file_logger();
        log.log_summary();
        assert_eq!(contents(&log).lines().count(), 1);
    }
}
