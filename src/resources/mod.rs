//! Idempotent resource primitives (check + apply pattern).
//!
//! Each resource knows its destination, can report whether that destination
//! is already present, and can perform exactly one observable effect.  The
//! skip/force decision is made by the caller (see [`crate::actions`]).
pub mod archive;
pub mod clone;
pub mod command;
pub mod copy;
pub mod download;
pub mod error;
pub mod helpers;
pub mod symlink;
pub mod write;

use std::path::Path;

use anyhow::Result;

pub use error::ResourceError;

/// State of a resource's destination.
///
/// # Examples
///
/// ```
/// use dotsetup::resources::ResourceState;
///
/// assert_ne!(ResourceState::Missing, ResourceState::Present);
/// assert_eq!(ResourceState::Unchecked, ResourceState::Unchecked);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// The destination does not exist (a dangling symlink counts as missing).
    Missing,
    /// The destination exists and is treated as already installed.
    Present,
    /// The resource has no destination to inspect and is always applied.
    Unchecked,
}

/// Interface shared by every action's underlying effect.
pub trait Resource {
    /// Status line printed when the resource is applied, with paths rendered
    /// relative to `home`.
    fn description(&self, home: &Path) -> String;

    /// The resolved destination, the unit of idempotency.
    fn target(&self) -> Option<&Path>;

    /// Short name of what the resource acts on, used in error reports.
    fn subject(&self, home: &Path) -> String {
        self.target()
            .map_or_else(String::new, |target| crate::paths::pretty(target, home))
    }

    /// Inspect the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem cannot be queried.
    fn current_state(&self) -> Result<ResourceState>;

    /// Perform the effect, replacing whatever is at the destination.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O, network or subprocess failure.
    fn apply(&self) -> Result<()>;
}

/// Destination state shared by file-like resources: present iff the path
/// exists once symlinks are followed.
pub(crate) fn path_state(path: &Path) -> ResourceState {
    if path.exists() {
        ResourceState::Present
    } else {
        ResourceState::Missing
    }
}
