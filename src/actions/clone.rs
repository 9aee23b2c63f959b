//! `clone`: check out a git repository.
use anyhow::Result;
use std::sync::Arc;

use super::{ActionExecutor, Context, decode};
use crate::config::params::CloneParams;
use crate::config::{ActionKind, Params};
use crate::resources::Resource;
use crate::resources::clone::CloneResource;

/// Executor for [`ActionKind::Clone`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneAction;

impl ActionExecutor for CloneAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Clone
    }

    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>> {
        let p: CloneParams = decode(self.kind(), params)?;
        Ok(Box::new(CloneResource::new(
            p.url,
            ctx.resolve_dest(&p.dest),
            p.branch,
            Arc::clone(&ctx.executor),
        )))
    }
}
