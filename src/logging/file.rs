//! Persistent per-command log file.
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::render::{EventFields, Style, render};

/// `$XDG_CACHE_HOME/dotsetup/<command>.log`, falling back to `~/.cache`.
///
/// Returns `None` when neither the cache directory nor a home directory is
/// known.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(".cache"))
        })?;
    Some(cache.join("dotsetup").join(format!("{command}.log")))
}

/// Layer writing every event it sees to one log file, one line per event
/// prefixed with the UTC time.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log at `path` for a run of `command`.
    pub(super) fn create(path: &Path, command: &str) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        writeln!(
            file,
            "# dotsetup {} {command}, started {}",
            crate::commands::version::version(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        )?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let fields = EventFields::of(event);
        let level = *event.metadata().level();
        let line = render(fields.kind, level, &fields.message, Style::Plain);
        if let Ok(mut file) = self.file.lock() {
            // A lost log line must not abort the install.
            let _ = writeln!(file, "{} {line}", chrono::Utc::now().format("%H:%M:%S"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_a_run_header_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache/dotsetup/install.log");
        FileLayer::create(&path, "install").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# dotsetup "), "{contents}");
        assert!(contents.contains(" install, started "), "{contents}");
    }

    #[test]
    fn create_truncates_the_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.log");
        fs::write(&path, "old run\n").unwrap();
        FileLayer::create(&path, "list").unwrap();
        assert!(!fs::read_to_string(&path).unwrap().contains("old run"));
    }

    #[test]
    fn log_file_is_named_after_the_command() {
        if let Some(path) = log_file_path("install") {
            assert!(path.ends_with("dotsetup/install.log"), "{}", path.display());
        }
    }
}
