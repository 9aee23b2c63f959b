//! Typed error variants for resource operations.
//!
//! Resource code returns these variants through [`anyhow::Error`]; callers
//! can `downcast_ref` when they need to branch on the cause.

use thiserror::Error;

/// Errors that arise from resource apply operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A command exited unsuccessfully.
    #[error("command '{program}' failed ({})", describe_exit(.exit_code))]
    CommandFailed {
        /// Name of the program that was invoked.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        exit_code: Option<i32>,
    },

    /// A required program is not on `PATH`.
    #[error("'{program}' not found on PATH")]
    ProgramNotFound {
        /// Name of the missing program.
        program: String,
    },

    /// The source file of a copy or symlink does not exist.
    #[error("source does not exist: {path}")]
    SourceMissing {
        /// The resolved source path.
        path: String,
    },

    /// The requested member is absent from the downloaded archive.
    #[error("member '{member}' not found in archive from {url}")]
    MemberNotFound {
        /// Requested member name.
        member: String,
        /// Archive URL.
        url: String,
    },

    /// A `run` action has no program to execute.
    #[error("empty command line")]
    EmptyCommand,
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "killed by signal".to_string(), |c| format!("exit {c}"))
}
