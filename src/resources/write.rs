//! Rendered text file resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::helpers::fs::ensure_parent_dir;
use super::{Resource, ResourceState, path_state};
use crate::paths::pretty;

/// A text file written from already rendered contents.
#[derive(Debug, Clone)]
pub struct WriteResource {
    /// Destination file.
    pub target: PathBuf,
    /// Contents, always newline-terminated.
    pub contents: String,
}

impl WriteResource {
    /// Create a new write resource, appending a trailing newline if absent.
    #[must_use]
    pub fn new(target: PathBuf, mut contents: String) -> Self {
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        Self { target, contents }
    }
}

impl Resource for WriteResource {
    fn description(&self, home: &Path) -> String {
        format!("Creating {}", pretty(&self.target, home))
    }

    fn target(&self) -> Option<&Path> {
        Some(&self.target)
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(path_state(&self.target))
    }

    fn apply(&self) -> Result<()> {
        ensure_parent_dir(&self.target)?;
        std::fs::write(&self.target, &self.contents)
            .with_context(|| format!("writing {}", self.target.display()))
    }
}
