//! `symlink` and `symlink_dir`: link a destination to a file in `configs/`.
use anyhow::Result;

use super::{ActionExecutor, Context, decode};
use crate::config::params::SymlinkParams;
use crate::config::{ActionKind, Params};
use crate::resources::Resource;
use crate::resources::symlink::SymlinkResource;

/// Executor for [`ActionKind::Symlink`] and [`ActionKind::SymlinkDir`].
#[derive(Debug, Clone, Copy)]
pub struct SymlinkAction {
    dir: bool,
}

impl SymlinkAction {
    /// The file variant.
    #[must_use]
    pub const fn file() -> Self {
        Self { dir: false }
    }

    /// The directory variant.
    #[must_use]
    pub const fn dir() -> Self {
        Self { dir: true }
    }
}

impl ActionExecutor for SymlinkAction {
    fn kind(&self) -> ActionKind {
        if self.dir {
            ActionKind::SymlinkDir
        } else {
            ActionKind::Symlink
        }
    }

    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>> {
        let p: SymlinkParams = decode(self.kind(), params)?;
        let source = ctx.resolve_source(&p.src);
        let target = ctx.resolve_dest(&p.dest);
        Ok(Box::new(if self.dir {
            SymlinkResource::dir(source, target)
        } else {
            SymlinkResource::file(source, target)
        }))
    }
}
