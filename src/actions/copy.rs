//! `copy`: copy a file out of `configs/`.
use anyhow::Result;

use super::{ActionExecutor, Context, decode};
use crate::config::params::CopyParams;
use crate::config::{ActionKind, Params};
use crate::resources::Resource;
use crate::resources::copy::CopyResource;

/// Executor for [`ActionKind::Copy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAction;

impl ActionExecutor for CopyAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Copy
    }

    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>> {
        let p: CopyParams = decode(self.kind(), params)?;
        Ok(Box::new(CopyResource::new(
            ctx.resolve_source(&p.src),
            ctx.resolve_dest(&p.dest),
        )))
    }
}
