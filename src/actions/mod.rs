//! Action executors and the dispatcher that selects them by kind name.
//!
//! Every executor turns one action's parameters into a
//! [`Resource`](crate::resources::Resource).  [`apply`] then applies the
//! shared skip/force/dry-run policy to it, so that the per-kind code never
//! repeats the decision.
pub mod clone;
pub mod context;
pub mod copy;
pub mod download;
pub mod run;
pub mod symlink;
pub mod write;

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;

pub use context::Context;

use crate::config::{ActionKind, Params};
use crate::error::UnknownKind;
use crate::logging::ActionStatus;
use crate::resources::{Resource, ResourceState};

/// Turns the parameters of one action kind into an applicable resource.
///
/// `prepare` must not touch the filesystem or network; all effects happen
/// in [`Resource::apply`].
pub trait ActionExecutor: Send + Sync {
    /// The kind this executor handles.
    fn kind(&self) -> ActionKind;

    /// Decode `params` and resolve paths against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters do not fit the kind.
    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>>;
}

/// Decode `params` into the record of `kind`, with the kind in the message.
pub(crate) fn decode<T: DeserializeOwned>(kind: ActionKind, params: &Params) -> Result<T> {
    if !params.is_named() && !kind.accepts_positional() {
        anyhow::bail!("{kind} takes named parameters only");
    }
    params
        .decode()
        .with_context(|| format!("invalid parameters for {kind}"))
}

/// Every built-in executor, one per [`ActionKind`].
#[must_use]
pub fn builtin_executors() -> Vec<Box<dyn ActionExecutor>> {
    vec![
        Box::new(clone::CloneAction),
        Box::new(copy::CopyAction),
        Box::new(download::DownloadAction),
        Box::new(write::WriteAction),
        Box::new(symlink::SymlinkAction::file()),
        Box::new(symlink::SymlinkAction::dir()),
        Box::new(run::RunAction),
    ]
}

/// Lookup table from kind name to executor, built once per session.
pub struct Dispatcher {
    table: BTreeMap<&'static str, Box<dyn ActionExecutor>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("kinds", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(builtin_executors())
    }
}

impl Dispatcher {
    /// Build the table from `executors`; a later executor for the same kind
    /// replaces an earlier one.
    #[must_use]
    pub fn new(executors: Vec<Box<dyn ActionExecutor>>) -> Self {
        let table = executors
            .into_iter()
            .map(|executor| (executor.kind().as_str(), executor))
            .collect();
        Self { table }
    }

    /// Look up the executor registered for `kind`.  Pure; performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKind`] if nothing is registered under `kind`.
    pub fn dispatch(&self, kind: &str) -> Result<&dyn ActionExecutor, UnknownKind> {
        self.table
            .get(kind)
            .map(AsRef::as_ref)
            .ok_or_else(|| UnknownKind(kind.to_string()))
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

/// What happened to one action, and the status line that was printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    /// Outcome.
    pub status: ActionStatus,
    /// Status line as shown to the user.
    pub line: String,
}

/// Apply `resource` under the session's skip/force/dry-run policy.
///
/// An existing destination is skipped unless `force` is set; resources
/// without a destination are always applied.  Exactly one status line is
/// logged.
///
/// # Errors
///
/// Returns an error if the destination cannot be inspected or the effect
/// fails.
pub fn apply(resource: &dyn Resource, ctx: &Context) -> Result<ActionReport> {
    let state = resource.current_state()?;
    if state == ResourceState::Present && !ctx.force {
        let line = format!("Skipping {}", resource.subject(&ctx.home));
        ctx.log.info(&line);
        return Ok(ActionReport {
            status: ActionStatus::Skipped,
            line,
        });
    }

    let line = resource.description(&ctx.home);
    if ctx.dry_run {
        ctx.log.dry_run(&line);
        return Ok(ActionReport {
            status: ActionStatus::DryRun,
            line,
        });
    }

    ctx.log.info(&line);
    resource.apply()?;
    Ok(ActionReport {
        status: ActionStatus::Applied,
        line,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Probe {
        target: PathBuf,
        state: ResourceState,
        applied: AtomicUsize,
    }

    impl Probe {
        fn new(state: ResourceState) -> Self {
            Self {
                target: PathBuf::from("/home/me/.vimrc"),
                state,
                applied: AtomicUsize::new(0),
            }
        }
    }

    impl Resource for Probe {
        fn description(&self, _home: &Path) -> String {
            "Creating ~/.vimrc".to_string()
        }
        fn target(&self) -> Option<&Path> {
            Some(&self.target)
        }
        fn current_state(&self) -> Result<ResourceState> {
            Ok(self.state)
        }
        fn apply(&self) -> Result<()> {
            self.applied.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn ctx(log: Arc<MemoryLog>) -> Context {
        Context::new(PathBuf::from("/opt/dotsetup"), PathBuf::from("/home/me"), log)
    }

    #[test]
    fn present_destination_is_skipped_without_force() {
        let log = Arc::new(MemoryLog::new());
        let probe = Probe::new(ResourceState::Present);
        let report = apply(&probe, &ctx(Arc::clone(&log))).unwrap();
        assert_eq!(report.status, ActionStatus::Skipped);
        assert_eq!(probe.applied.load(Ordering::SeqCst), 0);
        assert_eq!(log.lines(), ["  Skipping ~/.vimrc"]);
    }

    #[test]
    fn force_applies_over_present_destination() {
        let log = Arc::new(MemoryLog::new());
        let probe = Probe::new(ResourceState::Present);
        let report = apply(&probe, &ctx(Arc::clone(&log)).with_force(true)).unwrap();
        assert_eq!(report.status, ActionStatus::Applied);
        assert_eq!(probe.applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unchecked_resources_always_apply() {
        let log = Arc::new(MemoryLog::new());
        let probe = Probe::new(ResourceState::Unchecked);
        apply(&probe, &ctx(log)).unwrap();
        assert_eq!(probe.applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dry_run_reports_without_applying() {
        let log = Arc::new(MemoryLog::new());
        let probe = Probe::new(ResourceState::Missing);
        let report = apply(&probe, &ctx(Arc::clone(&log)).with_dry_run(true)).unwrap();
        assert_eq!(report.status, ActionStatus::DryRun);
        assert_eq!(probe.applied.load(Ordering::SeqCst), 0);
        assert_eq!(log.lines(), ["  [DRY RUN] Creating ~/.vimrc"]);
    }

    #[test]
    fn dry_run_still_reports_skips() {
        let log = Arc::new(MemoryLog::new());
        let probe = Probe::new(ResourceState::Present);
        let report = apply(&probe, &ctx(log).with_dry_run(true)).unwrap();
        assert_eq!(report.status, ActionStatus::Skipped);
    }

    #[test]
    fn dispatcher_resolves_every_kind() {
        let dispatcher = Dispatcher::default();
        for kind in ActionKind::ALL {
            assert_eq!(dispatcher.dispatch(kind.as_str()).unwrap().kind(), kind);
        }
    }

    #[test]
    fn dispatcher_rejects_unknown_kind() {
        let err = Dispatcher::default().dispatch("teleport").err().unwrap();
        assert_eq!(err, UnknownKind("teleport".to_string()));
    }

    #[test]
    fn kind_listing_is_sorted() {
        let kinds: Vec<_> = Dispatcher::default().kinds().collect();
        insta::assert_debug_snapshot!(kinds, @r#"
        [
            "clone",
            "copy",
            "download",
            "run",
            "symlink",
            "symlink_dir",
            "write",
        ]
        "#);
    }
}
