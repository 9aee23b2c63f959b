//! Core logging types: action entries, status, and the [`Log`] trait.

/// Outcome of one action, recorded for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    /// Program the action belongs to.
    pub program: String,
    /// Status line that was printed for the action.
    pub description: String,
    /// Final status of the action.
    pub status: ActionStatus,
}

/// Status of a completed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// The action performed its effect.
    Applied,
    /// The destination already existed and `force` was off.
    Skipped,
    /// Dry-run mode; the effect was only reported.
    DryRun,
    /// The action failed and aborted its program.
    Failed,
}

impl ActionStatus {
    /// Short label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`;
/// [`MemoryLog`](super::memory::MemoryLog) captures lines in memory for
/// embedding and tests.
pub trait Log: Send + Sync {
    /// Log a stage header (one per program).
    fn stage(&self, msg: &str);
    /// Log an informational message (one per action).
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an action result for the summary.
    fn record_action(&self, program: &str, description: &str, status: ActionStatus);
}

/// Render `applied/skipped/...` counts over `entries` as one summary line.
#[must_use]
pub fn summarize(entries: &[ActionEntry]) -> String {
    let count = |status: ActionStatus| entries.iter().filter(|e| e.status == status).count();
    let mut parts = vec![
        format!("{} {}", count(ActionStatus::Applied), ActionStatus::Applied.label()),
        format!("{} {}", count(ActionStatus::Skipped), ActionStatus::Skipped.label()),
    ];
    for status in [ActionStatus::DryRun, ActionStatus::Failed] {
        let n = count(status);
        if n > 0 {
            parts.push(format!("{n} {}", status.label()));
        }
    }
    format!("{} actions: {}", entries.len(), parts.join(", "))
}
