//! Path resolution against the invoking user's home directory.
use std::path::{Path, PathBuf};

/// Expand a leading `~` against `home` and anchor relative paths there.
///
/// `~` and `~/rest` are expanded; absolute paths are returned unchanged;
/// every other relative path is taken to be relative to `home`, so the result
/// is always absolute when `home` is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotsetup::paths::expand_home;
///
/// let home = Path::new("/home/me");
/// assert_eq!(expand_home("~/.vimrc", home), Path::new("/home/me/.vimrc"));
/// assert_eq!(expand_home("~", home), Path::new("/home/me"));
/// assert_eq!(expand_home("/etc/hosts", home), Path::new("/etc/hosts"));
/// assert_eq!(expand_home(".zshrc", home), Path::new("/home/me/.zshrc"));
/// ```
#[must_use]
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return home.join(rest.trim_start_matches('/'));
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        home.join(path)
    }
}

/// Render `path` as `~/...` when it lives under `home`, otherwise as-is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotsetup::paths::pretty;
///
/// let home = Path::new("/home/me");
/// assert_eq!(pretty(Path::new("/home/me/.vimrc"), home), "~/.vimrc");
/// assert_eq!(pretty(Path::new("/home/me"), home), "~");
/// assert_eq!(pretty(Path::new("/opt/tool"), home), "/opt/tool");
/// ```
#[must_use]
pub fn pretty(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rel) if rel.as_os_str().is_empty() => "~".to_string(),
        Ok(rel) => format!("~/{}", rel.display()),
        Err(_) => path.display().to_string(),
    }
}
