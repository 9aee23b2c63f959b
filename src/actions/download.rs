//! `download`: fetch a file, optionally one member of a `.tar.gz`.
use anyhow::Result;
use std::sync::Arc;

use super::{ActionExecutor, Context, decode};
use crate::config::params::DownloadParams;
use crate::config::{ActionKind, Params};
use crate::resources::Resource;
use crate::resources::download::DownloadResource;

/// Executor for [`ActionKind::Download`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadAction;

impl ActionExecutor for DownloadAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Download
    }

    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>> {
        let p: DownloadParams = decode(self.kind(), params)?;
        Ok(Box::new(DownloadResource::new(
            p.url,
            ctx.resolve_dest(&p.dest),
            p.executable,
            p.extract_member,
            Arc::clone(&ctx.fetcher),
        )))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use serde_json::json;
    use std::path::{Path, PathBuf};

    #[test]
    fn optional_fields_default() {
        let ctx = Context::new(
            PathBuf::from("/opt/dotsetup"),
            PathBuf::from("/home/me"),
            Arc::new(MemoryLog::new()),
        );
        let params = Params::new(json!({
            "url": "https://example.com/plug.vim",
            "dest": "~/.vim/autoload/plug.vim",
        }));
        let resource = DownloadAction.prepare(&params, &ctx).unwrap();
        assert_eq!(
            resource.target(),
            Some(Path::new("/home/me/.vim/autoload/plug.vim"))
        );
    }
}
