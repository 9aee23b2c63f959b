//! Git clone resource.
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::helpers::fs::{ensure_parent_dir, remove_existing};
use super::{Resource, ResourceError, ResourceState, path_state};
use crate::exec::Executor;
use crate::paths::pretty;

/// A repository cloned into a destination directory.
pub struct CloneResource {
    /// Repository URL.
    pub url: String,
    /// Destination directory.
    pub target: PathBuf,
    /// Branch to check out.
    pub branch: String,
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for CloneResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloneResource")
            .field("url", &self.url)
            .field("target", &self.target)
            .field("branch", &self.branch)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl CloneResource {
    /// Create a new clone resource.
    #[must_use]
    pub const fn new(
        url: String,
        target: PathBuf,
        branch: String,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            url,
            target,
            branch,
            executor,
        }
    }
}

impl Resource for CloneResource {
    fn description(&self, home: &Path) -> String {
        format!("Cloning {} -> {}", self.url, pretty(&self.target, home))
    }

    fn target(&self) -> Option<&Path> {
        Some(&self.target)
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(path_state(&self.target))
    }

    fn apply(&self) -> Result<()> {
        if !self.executor.which("git") {
            return Err(ResourceError::ProgramNotFound {
                program: "git".to_string(),
            }
            .into());
        }
        remove_existing(&self.target)?;
        ensure_parent_dir(&self.target)?;
        let args = [
            "clone".to_string(),
            self.url.clone(),
            self.target.display().to_string(),
            "--branch".to_string(),
            self.branch.clone(),
        ];
        self.executor.run("git", &args)
    }
}
