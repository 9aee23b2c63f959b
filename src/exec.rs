//! Subprocess launching behind an injectable [`Executor`] trait.
use anyhow::{Context as _, Result};
use std::process::Command;

use crate::resources::ResourceError;

/// Launches external programs.
///
/// Production code uses [`SystemExecutor`]; unit tests substitute the
/// `mockall`-generated `MockExecutor`.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `program` with `args`, inheriting stdin/stdout/stderr so the user
    /// sees the command's own output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or exits non-zero.
    fn run(&self, program: &str, args: &[String]) -> Result<()>;

    /// Check whether `program` can be found on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("failed to execute: {program}"))?;
        if !status.success() {
            return Err(ResourceError::CommandFailed {
                program: program.to_string(),
                exit_code: status.code(),
            }
            .into());
        }
        Ok(())
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
