//! HTTP download resource, optionally extracting one `.tar.gz` member.
use anyhow::{Context as _, Result};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::archive::extract_member;
use super::helpers::fs::ensure_parent_dir;
use super::{Resource, ResourceError, ResourceState, path_state};
use crate::http::Fetcher;
use crate::paths::pretty;

/// A file fetched over HTTP(S) and written to a destination.
pub struct DownloadResource {
    /// Source URL.
    pub url: String,
    /// Destination file.
    pub target: PathBuf,
    /// Whether the written file should be executable.
    pub executable: bool,
    /// Member to extract when the URL names a gzip-compressed tarball.
    pub member: Option<String>,
    fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for DownloadResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResource")
            .field("url", &self.url)
            .field("target", &self.target)
            .field("executable", &self.executable)
            .field("member", &self.member)
            .finish_non_exhaustive()
    }
}

impl DownloadResource {
    /// Create a new download resource.
    #[must_use]
    pub fn new(
        url: String,
        target: PathBuf,
        executable: bool,
        member: Option<String>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            url,
            target,
            executable,
            member,
            fetcher,
        }
    }

    /// Fill `out` with either the raw body or the requested member.
    fn fetch_into(&self, out: &mut impl std::io::Write) -> Result<()> {
        match &self.member {
            None => {
                let mut body = self.fetcher.get(&self.url)?;
                std::io::copy(&mut body, out)
                    .with_context(|| format!("reading response body from {}", self.url))?;
            }
            Some(member) => {
                let archive = self.fetcher.get_bytes(&self.url)?;
                let found = extract_member(archive.as_slice(), member, out)
                    .with_context(|| format!("unpacking {}", self.url))?;
                if !found {
                    return Err(ResourceError::MemberNotFound {
                        member: member.clone(),
                        url: self.url.clone(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

impl Resource for DownloadResource {
    fn description(&self, home: &Path) -> String {
        format!("Fetching {} -> {}", self.url, pretty(&self.target, home))
    }

    fn target(&self) -> Option<&Path> {
        Some(&self.target)
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(path_state(&self.target))
    }

    fn apply(&self) -> Result<()> {
        ensure_parent_dir(&self.target)?;
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // The destination is only replaced once the staged file is complete.
        let mut staged = staging_file(&dir)
            .with_context(|| format!("creating temporary file in {}", dir.display()))?;
        self.fetch_into(&mut staged)?;
        staged
            .flush()
            .with_context(|| format!("writing {}", self.target.display()))?;
        if self.executable {
            make_executable(staged.path())?;
        }
        staged
            .persist(&self.target)
            .with_context(|| format!("writing {}", self.target.display()))?;
        Ok(())
    }
}

/// Temporary file in `dir` created with the same mode a plain
/// `File::create` would get under the current umask.
fn staging_file(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod 755 {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
