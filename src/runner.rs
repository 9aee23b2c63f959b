//! Program runner: walks one program's actions strictly in order.
use crate::actions::{Context, Dispatcher, apply};
use crate::config::RawAction;
use crate::error::InstallError;
use crate::logging::ActionStatus;

/// Counters for one or more programs.
///
/// # Examples
///
/// ```
/// use dotsetup::runner::RunStats;
///
/// let mut total = RunStats::default();
/// total.merge(&RunStats { applied: 2, skipped: 1, dry_run: 0 });
/// total.merge(&RunStats { applied: 1, skipped: 0, dry_run: 0 });
/// assert_eq!(total.summary(), "3 applied, 1 skipped");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Actions that performed their effect.
    pub applied: usize,
    /// Actions whose destination already existed.
    pub skipped: usize,
    /// Actions only reported because of `--dry-run`.
    pub dry_run: usize,
}

impl RunStats {
    /// Add `other` into `self`.
    pub const fn merge(&mut self, other: &Self) {
        self.applied += other.applied;
        self.skipped += other.skipped;
        self.dry_run += other.dry_run;
    }

    /// Total actions counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.applied + self.skipped + self.dry_run
    }

    /// Human-readable summary, e.g. `3 applied, 1 skipped`.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.dry_run > 0 {
            format!(
                "{} applied, {} skipped, {} dry-run",
                self.applied, self.skipped, self.dry_run
            )
        } else {
            format!("{} applied, {} skipped", self.applied, self.skipped)
        }
    }

    const fn count(&mut self, status: ActionStatus) {
        match status {
            ActionStatus::Applied => self.applied += 1,
            ActionStatus::Skipped => self.skipped += 1,
            ActionStatus::DryRun => self.dry_run += 1,
            ActionStatus::Failed => {}
        }
    }
}

/// Run the actions of `program` in declaration order.
///
/// The first failure stops the program; actions already applied stay
/// applied.
///
/// # Errors
///
/// Returns [`InstallError::UnknownAction`] when an action's kind has no
/// executor, and [`InstallError::Execution`] when an executor fails.
pub fn run_program(
    program: &str,
    actions: &[RawAction],
    ctx: &Context,
    dispatcher: &Dispatcher,
) -> Result<RunStats, InstallError> {
    let mut stats = RunStats::default();
    for (i, action) in actions.iter().enumerate() {
        let index = i + 1;
        let executor = dispatcher
            .dispatch(&action.kind)
            .map_err(|_| InstallError::UnknownAction {
                program: program.to_string(),
                index,
                kind: action.kind.clone(),
            })?;

        let fail = |dest: String, source: anyhow::Error| {
            ctx.log.record_action(
                program,
                &format!("{} {dest}", action.kind),
                ActionStatus::Failed,
            );
            InstallError::Execution {
                program: program.to_string(),
                kind: action.kind.clone(),
                dest,
                source,
            }
        };

        let resource = executor
            .prepare(&action.params, ctx)
            .map_err(|e| fail(format!("(action #{index})"), e))?;
        let report = apply(resource.as_ref(), ctx)
            .map_err(|e| fail(resource.subject(&ctx.home), e))?;

        ctx.log.record_action(program, &report.line, report.status);
        stats.count(report.status);
    }
    ctx.log.debug(&format!("{program}: {}", stats.summary()));
    Ok(stats)
}
