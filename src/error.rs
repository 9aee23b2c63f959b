//! Domain-specific error types for the installer.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`],
//! [`InstallError`]) while the command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! InstallError
//! ├── Config(ConfigError)   missing, unreadable or malformed configs file
//! ├── UnknownProgram        requested program is not configured
//! ├── UnknownAction         action kind has no registered executor
//! └── Execution             any executor failure, with program/kind/dest
//!
//! UnknownKind               dispatcher lookup miss, lifted into UnknownAction
//! ```

use thiserror::Error;

/// Top-level error type for an installer session.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The configuration document could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A requested program is not present in the configuration.
    #[error("unknown program '{name}' (available: {available})")]
    UnknownProgram {
        /// Name that was requested.
        name: String,
        /// Comma-separated list of configured program names.
        available: String,
    },

    /// An action declares a kind with no registered executor.
    #[error("{program}: action #{index} has unknown kind '{kind}'")]
    UnknownAction {
        /// Program containing the action.
        program: String,
        /// One-based position of the action in the program.
        index: usize,
        /// The declared kind.
        kind: String,
    },

    /// An executor failed while performing its effect.
    ///
    /// The message names the action only; the cause is reachable through
    /// [`source`](std::error::Error::source) and shows up when the error is
    /// rendered with `{:#}` as an [`anyhow::Error`].
    #[error("{program}: {kind} {dest} failed")]
    Execution {
        /// Program containing the action.
        program: String,
        /// Kind of the failing action.
        kind: String,
        /// Resolved destination, rendered relative to home where possible.
        dest: String,
        /// Underlying failure.
        source: anyhow::Error,
    },
}

/// Dispatch miss: no executor is registered under the given kind name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action kind '{0}'")]
pub struct UnknownKind(pub String);

/// Errors that arise while locating, reading and shaping the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file could be found under the root directory.
    #[error("no configs.toml, configs.yml or configs.yaml found in {root}")]
    NotFound {
        /// Directory that was searched.
        root: String,
    },

    /// An I/O error occurred while reading the configuration file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML/YAML.
    #[error("cannot parse {path}: {message}")]
    Parse {
        /// Path to the offending file.
        path: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported config format for {path} (expected .toml, .yml or .yaml)")]
    UnsupportedFormat {
        /// Path to the offending file.
        path: String,
    },

    /// The document's top level is not a mapping of program names.
    #[error("{path}: top level must be a mapping of program names, found {found}")]
    NotAMapping {
        /// Path to the offending file.
        path: String,
        /// Kind of value found instead.
        found: &'static str,
    },

    /// A program's value is not a list of actions.
    #[error("program '{program}': {message}")]
    InvalidProgram {
        /// Program name.
        program: String,
        /// What is wrong with it.
        message: String,
    },

    /// An action entry is malformed or its parameters do not fit its kind.
    #[error("program '{program}', action #{index} ({kind}): {message}")]
    InvalidAction {
        /// Program name.
        program: String,
        /// One-based position of the action.
        index: usize,
        /// Declared kind, or `?` when it could not be read.
        kind: String,
        /// What is wrong with it.
        message: String,
    },
}
