//! Declarative installer engine.
//!
//! A configuration file maps program names to ordered lists of actions
//! (`clone`, `copy`, `download`, `write`, `symlink`, `symlink_dir`, `run`).
//! Installing a program applies its actions in order; an action whose
//! destination already exists is skipped unless `force` is set.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load TOML/YAML configuration and shape-check actions
//! - **[`resources`]**: `check + apply` primitives (symlinks, downloads, ...)
//! - **[`actions`]**: executors that turn action parameters into resources,
//!   and the dispatcher that selects them by kind
//! - **[`session`]**: installs programs in order, via [`runner`]
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod http;
pub mod logging;
pub mod paths;
pub mod resources;
pub mod runner;
pub mod session;
pub mod template;
