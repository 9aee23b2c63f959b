//! Command: install programs.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::{Log, Logger};

/// Run the install command.
///
/// A failure is logged, with the failing action's program, kind and
/// destination, before it is returned.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a requested
/// program is unknown, or any action fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let sink = Arc::clone(log);
    let result = install(global, opts, sink);
    log.log_summary();
    super::report_failure(result, log.as_ref())
}

fn install(global: &GlobalOpts, opts: &InstallOpts, log: Arc<dyn Log>) -> Result<()> {
    log.debug(&format!("dotsetup {}", super::version::version()));
    let session = super::open_session(global, log, opts.force)?;
    session.install(&opts.programs)?;
    Ok(())
}
