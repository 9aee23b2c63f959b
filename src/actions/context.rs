//! Immutable per-run context handed to every action executor.
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::exec::{Executor, SystemExecutor};
use crate::http::{Fetcher, UreqFetcher};
use crate::logging::Log;
use crate::paths::{expand_home, pretty};
use crate::template::Bindings;

/// Name of the directory under the tool root holding `copy`/`symlink` sources.
pub const CONFIGS_DIR: &str = "configs";

/// Shared, read-only state for one installer run.
pub struct Context {
    /// Overwrite existing destinations instead of skipping them.
    pub force: bool,
    /// Report what would happen without touching anything.
    pub dry_run: bool,
    /// Invoking user's home directory.
    pub home: PathBuf,
    /// Tool directory: holds the configuration file and `configs/`.
    pub root: PathBuf,
    /// Output sink.
    pub log: Arc<dyn Log>,
    /// Subprocess launcher.
    pub executor: Arc<dyn Executor>,
    /// HTTP client.
    pub fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("force", &self.force)
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("root", &self.root)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("fetcher", &"<dyn Fetcher>")
            .finish()
    }
}

impl Context {
    /// Create a context with the system executor and HTTP client, no force
    /// and no dry run.
    #[must_use]
    pub fn new(root: PathBuf, home: PathBuf, log: Arc<dyn Log>) -> Self {
        Self {
            force: false,
            dry_run: false,
            home,
            root,
            log,
            executor: Arc::new(SystemExecutor),
            fetcher: Arc::new(UreqFetcher::new()),
        }
    }

    /// Set the session-wide force flag.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Replace the subprocess launcher.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Replace the HTTP client.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Directory holding `copy` and `symlink` sources.
    #[must_use]
    pub fn configs_dir(&self) -> PathBuf {
        self.root.join(CONFIGS_DIR)
    }

    /// Resolve a destination: `~` expands to home, relative paths are
    /// anchored at home.
    #[must_use]
    pub fn resolve_dest(&self, raw: &str) -> PathBuf {
        expand_home(raw, &self.home)
    }

    /// Resolve a source under [`configs_dir`](Self::configs_dir).
    ///
    /// Absolute and `~`-prefixed sources are taken as they are.
    #[must_use]
    pub fn resolve_source(&self, raw: &str) -> PathBuf {
        if raw == "~" || raw.starts_with("~/") || Path::new(raw).is_absolute() {
            expand_home(raw, &self.home)
        } else {
            self.configs_dir().join(raw)
        }
    }

    /// Render `path` relative to home for reporting.
    #[must_use]
    pub fn pretty(&self, path: &Path) -> String {
        pretty(path, &self.home)
    }

    /// Template bindings for this run.
    #[must_use]
    pub fn bindings(&self) -> Bindings {
        Bindings::new(&self.root, &self.home)
    }
}

/// The invoking user's home directory.
///
/// # Errors
///
/// Returns an error if neither `HOME` nor (on Windows) `USERPROFILE` is set.
pub fn home_dir() -> Result<PathBuf> {
    let home = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map_err(|_| anyhow::anyhow!("neither USERPROFILE nor HOME environment variable is set"))?
    } else {
        std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))?
    };
    Ok(PathBuf::from(home))
}
