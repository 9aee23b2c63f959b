//! Subcommand handlers.
pub mod install;
pub mod list;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::actions::{Context, context::home_dir};
use crate::cli::GlobalOpts;
use crate::config::Format;
use crate::logging::Log;
use crate::session::Session;

/// Whether `dir` holds one of the recognised configuration files.
fn has_config(dir: &Path) -> bool {
    Format::CANDIDATES.iter().any(|name| dir.join(name).is_file())
}

/// Resolve the tool directory from CLI arguments or auto-detection.
///
/// Order: `--root`, `DOTSETUP_ROOT`, the binary's install location
/// (`target/<profile>/` or `bin/`), then the current directory.
///
/// # Errors
///
/// Returns an error if no candidate holds a configuration file.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("DOTSETUP_ROOT") {
        return Ok(PathBuf::from(root));
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        let candidates = [
            parent.join("../.."), // target/release/ -> repo root
            parent.join(".."),    // bin/ -> repo root
        ];
        for candidate in &candidates {
            if has_config(candidate) {
                return dunce::canonicalize(candidate)
                    .with_context(|| format!("canonicalize {}", candidate.display()));
            }
        }
    }

    let cwd = std::env::current_dir()?;
    if has_config(&cwd) {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine tool directory. Use --root or set DOTSETUP_ROOT");
}

/// Resolve the root, build a context and load a session.
///
/// A `--config` path is used as given; otherwise the configuration is
/// located under the root.  Relative paths are taken from the current
/// directory and the root is made absolute, so `{this_dir}` and symlink
/// targets never depend on where the links are read from.
///
/// # Errors
///
/// Returns an error if the root or home directory cannot be determined or
/// the configuration fails to load.
pub fn open_session(global: &GlobalOpts, log: Arc<dyn Log>, force: bool) -> Result<Session> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    open_session_in(&cwd, global, log, force)
}

fn open_session_in(
    cwd: &Path,
    global: &GlobalOpts,
    log: Arc<dyn Log>,
    force: bool,
) -> Result<Session> {
    let config = global.config.as_ref().map(|path| cwd.join(path));
    let root = match &config {
        Some(config) if global.root.is_none() && std::env::var_os("DOTSETUP_ROOT").is_none() => {
            config.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf)
        }
        _ => cwd.join(resolve_root(global)?),
    };
    let root = dunce::canonicalize(&root)
        .with_context(|| format!("tool directory {}", root.display()))?;
    let ctx = Context::new(root, home_dir()?, log)
        .with_force(force)
        .with_dry_run(global.dry_run);
    Ok(Session::load(ctx, config.as_deref())?)
}

/// Log a failed command's error, cause chain included, then hand it back.
///
/// # Errors
///
/// Returns `result` unchanged.
pub fn report_failure(result: Result<()>, log: &dyn Log) -> Result<()> {
    if let Err(err) = &result {
        log.error(&format!("{err:#}"));
    }
    result
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;

    #[test]
    fn resolve_root_uses_explicit_root() {
        let global = GlobalOpts {
            root: Some(PathBuf::from("/explicit/path")),
            ..GlobalOpts::default()
        };
        assert_eq!(
            resolve_root(&global).unwrap(),
            PathBuf::from("/explicit/path")
        );
    }

    #[test]
    fn relative_config_yields_an_absolute_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("configs.yml"),
            "vim:\n  - symlink: [vimrc, ~/.vimrc]\n",
        )
        .unwrap();
        let global = GlobalOpts {
            config: Some(PathBuf::from("configs.yml")),
            ..GlobalOpts::default()
        };

        let session =
            open_session_in(dir.path(), &global, Arc::new(MemoryLog::new()), false).unwrap();

        let root = &session.context().root;
        assert!(root.is_absolute(), "{}", root.display());
        assert_eq!(root, &dunce::canonicalize(dir.path()).unwrap());
        assert!(session.context().resolve_source("vimrc").is_absolute());
        assert!(session.config().program("vim").is_some());
    }

    #[test]
    fn relative_root_is_taken_from_the_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dots")).unwrap();
        std::fs::write(dir.path().join("dots/configs.toml"), "zsh = []\n").unwrap();
        let global = GlobalOpts {
            root: Some(PathBuf::from("dots")),
            ..GlobalOpts::default()
        };

        let session =
            open_session_in(dir.path(), &global, Arc::new(MemoryLog::new()), false).unwrap();

        assert_eq!(
            session.context().root,
            dunce::canonicalize(dir.path().join("dots")).unwrap()
        );
    }

    #[test]
    fn report_failure_logs_the_cause_chain() {
        let log = MemoryLog::new();
        let result = Err(anyhow::anyhow!("exit 128").context("vim: clone ~/.vim failed"));
        assert!(report_failure(result, &log).is_err());
        assert_eq!(log.lines(), ["ERROR vim: clone ~/.vim failed: exit 128"]);
        assert!(report_failure(Ok(()), &log).is_ok());
        assert_eq!(log.lines().len(), 1);
    }

    #[test]
    fn has_config_detects_each_candidate() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_config(dir.path()));
        std::fs::write(dir.path().join("configs.yaml"), "{}").unwrap();
        assert!(has_config(dir.path()));
    }
}
