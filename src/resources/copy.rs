//! File copy resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_parent_dir, is_symlink, remove_existing};
use super::{Resource, ResourceError, ResourceState, path_state};
use crate::paths::pretty;

/// A file copied from the tool's `configs/` directory.
#[derive(Debug, Clone)]
pub struct CopyResource {
    /// Resolved source file.
    pub source: PathBuf,
    /// Destination file, overwritten in place.  A symlink here is replaced
    /// by a regular file rather than written through.
    pub target: PathBuf,
}

impl CopyResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for CopyResource {
    fn description(&self, home: &Path) -> String {
        format!(
            "Copy {} -> {}",
            pretty(&self.source, home),
            pretty(&self.target, home)
        )
    }

    fn target(&self) -> Option<&Path> {
        Some(&self.target)
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(path_state(&self.target))
    }

    fn apply(&self) -> Result<()> {
        if !self.source.is_file() {
            return Err(ResourceError::SourceMissing {
                path: self.source.display().to_string(),
            }
            .into());
        }
        if is_symlink(&self.target) {
            remove_existing(&self.target)?;
        }
        ensure_parent_dir(&self.target)?;
        std::fs::copy(&self.source, &self.target).with_context(|| {
            format!(
                "copying {} to {}",
                self.source.display(),
                self.target.display()
            )
        })?;
        Ok(())
    }
}
