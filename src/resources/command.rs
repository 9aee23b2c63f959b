//! Subprocess resource for `run` actions.
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use super::{Resource, ResourceError, ResourceState};
use crate::exec::Executor;

/// A command line run unconditionally.
pub struct CommandResource {
    /// Program followed by its arguments, already rendered.
    pub args: Vec<String>,
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for CommandResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandResource")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl CommandResource {
    /// Create a new command resource.
    #[must_use]
    pub fn new(args: Vec<String>, executor: Arc<dyn Executor>) -> Self {
        Self { args, executor }
    }
}

impl Resource for CommandResource {
    fn description(&self, _home: &Path) -> String {
        format!("Running `{}`", self.args.join(" "))
    }

    fn target(&self) -> Option<&Path> {
        None
    }

    fn subject(&self, _home: &Path) -> String {
        format!("`{}`", self.args.join(" "))
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(ResourceState::Unchecked)
    }

    fn apply(&self) -> Result<()> {
        let Some((program, rest)) = self.args.split_first() else {
            return Err(ResourceError::EmptyCommand.into());
        };
        self.executor.run(program, rest)
    }
}
