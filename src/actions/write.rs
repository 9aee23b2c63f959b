//! `write`: render a template into a text file.
use anyhow::{Context as _, Result};

use super::{ActionExecutor, Context, decode};
use crate::config::params::WriteParams;
use crate::config::{ActionKind, Params};
use crate::resources::Resource;
use crate::resources::write::WriteResource;

/// Executor for [`ActionKind::Write`].
///
/// The `src` parameter names the destination file.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteAction;

impl ActionExecutor for WriteAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Write
    }

    fn prepare(&self, params: &Params, ctx: &Context) -> Result<Box<dyn Resource>> {
        let p: WriteParams = decode(self.kind(), params)?;
        let template = p
            .template()
            .with_context(|| format!("invalid template for {}", p.src))?;
        Ok(Box::new(WriteResource::new(
            ctx.resolve_dest(&p.src),
            template.render(&ctx.bindings()),
        )))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn ctx() -> Context {
        Context::new(
            PathBuf::from("/opt/dotsetup"),
            PathBuf::from("/home/me"),
            Arc::new(MemoryLog::new()),
        )
    }

    #[test]
    fn renders_both_variables() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("zshrc");
        let params = Params::new(json!([
            dest.display().to_string(),
            "source {this_dir}/zsh/init.zsh # {home}"
        ]));
        WriteAction.prepare(&params, &ctx()).unwrap().apply().unwrap();
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "source /opt/dotsetup/zsh/init.zsh # /home/me\n"
        );
    }

    #[test]
    fn unknown_variable_is_fatal() {
        let params = Params::new(json!({"src": "~/.zshrc", "contents": "{user}"}));
        let err = WriteAction.prepare(&params, &ctx()).err().unwrap();
        assert!(format!("{err:#}").contains("user"));
    }
}
