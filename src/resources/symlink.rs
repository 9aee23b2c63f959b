//! Symlink resource for files and directories.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_grandparent_dir, ensure_parent_dir, occupied, remove_existing};
use super::{Resource, ResourceState, path_state};
use crate::paths::pretty;

/// A symlink at `target` pointing to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// What the link points to.
    pub source: PathBuf,
    /// Where the link lives.
    pub target: PathBuf,
    /// Directory-level link: only the grandparent of `target` is created.
    pub dir: bool,
}

impl SymlinkResource {
    /// Link to a file.
    #[must_use]
    pub const fn file(source: PathBuf, target: PathBuf) -> Self {
        Self {
            source,
            target,
            dir: false,
        }
    }

    /// Link to a directory.
    #[must_use]
    pub const fn dir(source: PathBuf, target: PathBuf) -> Self {
        Self {
            source,
            target,
            dir: true,
        }
    }
}

impl Resource for SymlinkResource {
    fn description(&self, home: &Path) -> String {
        format!(
            "Symlink {} -> {}",
            pretty(&self.target, home),
            pretty(&self.source, home)
        )
    }

    fn target(&self) -> Option<&Path> {
        Some(&self.target)
    }

    /// A dangling link resolves to nothing and is therefore missing.
    fn current_state(&self) -> Result<ResourceState> {
        Ok(path_state(&self.target))
    }

    fn apply(&self) -> Result<()> {
        if self.dir {
            ensure_grandparent_dir(&self.target)?;
        } else {
            ensure_parent_dir(&self.target)?;
        }
        if occupied(&self.target) {
            remove_existing(&self.target)?;
        }
        create_link(&self.source, &self.target, self.dir).with_context(|| {
            format!(
                "symlink {} -> {}",
                self.target.display(),
                self.source.display()
            )
        })
    }
}

#[cfg(unix)]
fn create_link(source: &Path, target: &Path, _dir: bool) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn create_link(source: &Path, target: &Path, dir: bool) -> std::io::Result<()> {
    if dir || source.is_dir() {
        std::os::windows::fs::symlink_dir(source, target)
    } else {
        std::os::windows::fs::symlink_file(source, target)
    }
}
