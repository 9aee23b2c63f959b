//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Ensure the grandparent directory of `path` exists.
///
/// Used for directory-level links, where `path` names the link and its
/// parent is expected to be managed by the link's own layout.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_grandparent_dir(path: &Path) -> Result<()> {
    if let Some(grandparent) = path.parent().and_then(Path::parent) {
        ensure_dir(grandparent)?;
    }
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create parent: {}", dir.display()))
}

/// Whether anything, including a dangling symlink, occupies `path`.
#[must_use]
pub fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Whether `path` is a symlink (dangling or not).
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|m| m.file_type().is_symlink())
}

/// Remove whatever occupies `path`: a file, a symlink (without following
/// it), or a whole directory tree.  Does nothing if `path` is vacant.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove existing directory: {}", path.display()))
    } else {
        remove_link_or_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))
    }
}

/// On Windows a directory symlink must be removed with `remove_dir`.
fn remove_link_or_file(path: &Path) -> std::io::Result<()> {
    #[cfg(windows)]
    {
        if std::fs::remove_file(path).is_err() {
            return std::fs::remove_dir(path);
        }
        Ok(())
    }
    #[cfg(not(windows))]
    {
        std::fs::remove_file(path)
    }
}
