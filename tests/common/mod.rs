// Shared helpers for integration tests.
//
// Provides a temporary tool root (config file plus `configs/`) and a separate
// home directory, so each test installs into an isolated tree.  External
// effects go through recording stand-ins for git/commands and HTTP.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use dotsetup::actions::Context;
use dotsetup::exec::Executor;
use dotsetup::http::Fetcher;
use dotsetup::logging::MemoryLog;
use dotsetup::session::Session;

/// Records every command instead of launching it.
///
/// `git clone` creates its destination directory, as the real command would.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Vec<String>>>,
    /// Programs whose invocation fails.
    pub failing: Vec<String>,
}

impl RecordingExecutor {
    /// An executor on which `program` always fails.
    pub fn failing_on(program: &str) -> Self {
        Self {
            failing: vec![program.to_string()],
            ..Self::default()
        }
    }

    /// Every recorded invocation, program first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("executor lock").clone()
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().expect("executor lock").push(call);
        if self.failing.iter().any(|p| p == program) {
            anyhow::bail!("{program} exited with status 1");
        }
        if let ("git", [sub, _url, dest, ..]) = (program, args)
            && sub == "clone"
        {
            std::fs::create_dir_all(dest)?;
        }
        Ok(())
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// Serves canned bodies by URL; any other URL fails like a 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    /// Serve `body` at `url`.
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn get(&self, url: &str) -> Result<Box<dyn Read>> {
        let body = self
            .bodies
            .get(url)
            .ok_or_else(|| anyhow::anyhow!("GET {url}: status 404"))?;
        Ok(Box::new(Cursor::new(body.clone())))
    }
}

/// Build a gzip-compressed tar archive holding `files`.
pub fn tar_gz(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        builder
            .append_data(&mut header, name, *data)
            .expect("append tar entry");
    }
    builder
        .into_inner()
        .expect("finish tar")
        .finish()
        .expect("finish gzip")
}

/// An isolated tool root and home directory backed by a [`tempfile::TempDir`].
pub struct Fixture {
    dir: tempfile::TempDir,
    /// Captured console output.
    pub log: Arc<MemoryLog>,
    /// Stand-in for git and `run` commands.
    pub executor: Arc<RecordingExecutor>,
    fetcher: Arc<dyn Fetcher>,
}

impl Fixture {
    /// Create an empty root (with `configs/`) and home directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("root/configs")).expect("create configs dir");
        std::fs::create_dir_all(dir.path().join("home")).expect("create home dir");
        Self {
            dir,
            log: Arc::new(MemoryLog::new()),
            executor: Arc::new(RecordingExecutor::default()),
            fetcher: Arc::new(StaticFetcher::default()),
        }
    }

    /// Replace the command executor.
    pub fn with_executor(mut self, executor: RecordingExecutor) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Replace the HTTP fetcher.
    pub fn with_fetcher(mut self, fetcher: StaticFetcher) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    /// The tool root directory.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    /// The home directory.
    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Resolve `rel` under the home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    /// Write `configs/<name>` under the root.
    pub fn config_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join("configs").join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent");
        }
        std::fs::write(&path, content).expect("write config file");
        path
    }

    /// Write the configuration document `file_name` (e.g. `configs.yml`).
    pub fn configs(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.root().join(file_name);
        std::fs::write(&path, content).expect("write configuration");
        path
    }

    /// A context rooted at the fixture, wired to its stand-ins.
    pub fn context(&self) -> Context {
        let log = Arc::clone(&self.log);
        let executor = Arc::clone(&self.executor);
        Context::new(self.root(), self.home(), log)
            .with_executor(executor)
            .with_fetcher(Arc::clone(&self.fetcher))
    }

    /// Load a session from the root with the default context.
    pub fn session(&self) -> Session {
        Session::load(self.context(), None).expect("load session")
    }

    /// Load a session from the root with a customised context.
    pub fn session_with(&self, adjust: impl FnOnce(Context) -> Context) -> Session {
        Session::load(adjust(self.context()), None).expect("load session")
    }
}

/// Shorthand for a list of program names.
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Whether `path` is a symlink pointing at `target`.
pub fn links_to(path: &Path, target: &Path) -> bool {
    std::fs::read_link(path).is_ok_and(|dest| dest == target)
}
