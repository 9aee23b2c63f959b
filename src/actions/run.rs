//! `run`: execute a command line after `{home}` substitution.
use anyhow::{Context as _, Result};
use std::sync::Arc;

use super::{ActionExecutor, Context, decode};
use crate::config::params::RunParams;
use crate::config::{ActionKind, Params};
use crate::resources::Resource;
use crate::resources::command::CommandResource;

/// Executor for [`ActionKind::Run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RunAction;

impl ActionExecutor for RunAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Run
    }

    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>> {
        let p: RunParams = decode(self.kind(), params)?;
        let bindings = ctx.bindings();
        let args = p
            .templates()
            .context("invalid command template")?
            .iter()
            .map(|t| t.render(&bindings))
            .collect();
        Ok(Box::new(CommandResource::new(
            args,
            Arc::clone(&ctx.executor),
        )))
    }
}
