//! Action kinds and their typed parameter records.
//!
//! Every record derives [`Deserialize`], which accepts both the positional
//! form (`symlink: [vimrc, ~/.vimrc]`) and the named form
//! (`symlink: {src: vimrc, dest: ~/.vimrc}`).  Trailing positional values
//! that carry a default may be omitted.
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::template::{RUN_VARIABLES, Template, TemplateError, WRITE_VARIABLES};

/// The closed set of action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    /// Clone a git repository.
    Clone,
    /// Copy a file from `configs/`.
    Copy,
    /// Download a URL, optionally extracting one archive member.
    Download,
    /// Write templated text.
    Write,
    /// Symlink a file from `configs/`.
    Symlink,
    /// Symlink a directory from `configs/`.
    SymlinkDir,
    /// Run a command.
    Run,
}

impl ActionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Clone,
        Self::Copy,
        Self::Download,
        Self::Write,
        Self::Symlink,
        Self::SymlinkDir,
        Self::Run,
    ];

    /// Name used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Copy => "copy",
            Self::Download => "download",
            Self::Write => "write",
            Self::Symlink => "symlink",
            Self::SymlinkDir => "symlink_dir",
            Self::Run => "run",
        }
    }

    /// Whether parameters may be given positionally.  `download` only
    /// accepts named parameters.
    #[must_use]
    pub const fn accepts_positional(self) -> bool {
        !matches!(self, Self::Download)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

fn default_branch() -> String {
    "master".to_string()
}

/// Parameters of `clone`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloneParams {
    /// Repository URL.
    pub url: String,
    /// Destination directory.
    pub dest: String,
    /// Branch to check out.
    #[serde(default = "default_branch")]
    pub branch: String,
}

/// Parameters of `copy`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyParams {
    /// Source path relative to `configs/`.
    pub src: String,
    /// Destination file.
    pub dest: String,
}

/// Parameters of `download`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadParams {
    /// URL to fetch.
    pub url: String,
    /// Destination file.
    pub dest: String,
    /// Mark the destination `0755` after writing.
    #[serde(default)]
    pub executable: bool,
    /// Member of a `.tar.gz` archive to extract instead of saving the body.
    #[serde(default)]
    pub extract_member: Option<String>,
}

/// Parameters of `write`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteParams {
    /// Destination file.
    pub src: String,
    /// Template text.
    pub contents: String,
}

impl WriteParams {
    /// Parse [`contents`](Self::contents) as a template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the contents reference an unknown variable
    /// or contain unbalanced braces.
    pub fn template(&self) -> Result<Template, TemplateError> {
        Template::parse(&self.contents, WRITE_VARIABLES)
    }
}

/// Parameters of `symlink` and `symlink_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymlinkParams {
    /// Link target, relative to `configs/`.
    pub src: String,
    /// Path of the link itself.
    pub dest: String,
}

/// Parameters of `run`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunParams {
    /// Program followed by its arguments.
    pub args: Vec<String>,
}

impl RunParams {
    /// Parse every argument as a template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for the first argument that references a
    /// variable other than `{home}` or contains unbalanced braces.
    pub fn templates(&self) -> Result<Vec<Template>, TemplateError> {
        self.args
            .iter()
            .map(|arg| Template::parse(arg, RUN_VARIABLES))
            .collect()
    }
}

/// The raw parameter value of an action, positional or named.
#[derive(Debug, Clone, PartialEq)]
pub struct Params(serde_json::Value);

impl Params {
    /// Wrap a raw value.
    #[must_use]
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Whether the parameters were given by name.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.0.is_object()
    }

    /// Decode into the record of a specific kind.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when the shape does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

/// Compact JSON rendering, as shown by `dotsetup list`.
impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that `params` decode into the record for `kind` and that any
/// template strings parse.
///
/// # Errors
///
/// Returns a human-readable message describing the first problem found.
pub fn validate(kind: ActionKind, params: &Params) -> Result<(), String> {
    if !params.is_named() && !kind.accepts_positional() {
        return Err(format!("{kind} takes named parameters only"));
    }
    let describe = |e: serde_json::Error| e.to_string();
    match kind {
        ActionKind::Clone => params.decode::<CloneParams>().map(drop).map_err(describe),
        ActionKind::Copy => params.decode::<CopyParams>().map(drop).map_err(describe),
        ActionKind::Download => params.decode::<DownloadParams>().map(drop).map_err(describe),
        ActionKind::Symlink | ActionKind::SymlinkDir => {
            params.decode::<SymlinkParams>().map(drop).map_err(describe)
        }
        ActionKind::Write => {
            let write: WriteParams = params.decode().map_err(describe)?;
            write.template().map(drop).map_err(|e| e.to_string())
        }
        ActionKind::Run => {
            let run: RunParams = params.decode().map_err(describe)?;
            if run.args.is_empty() {
                return Err("run needs at least a program name".to_string());
            }
            run.templates().map(drop).map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_round_trip_through_from_str() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>(), Ok(kind));
        }
        assert_eq!("teleport".parse::<ActionKind>(), Err("teleport".to_string()));
    }

    #[test]
    fn positional_clone_uses_default_branch() {
        let p = Params::new(json!(["https://example.com/repo.git", "~/src/repo"]));
        let clone: CloneParams = p.decode().unwrap();
        assert_eq!(clone.branch, "master");
        assert!(!p.is_named());
    }

    #[test]
    fn positional_clone_accepts_branch() {
        let p = Params::new(json!(["u", "d", "main"]));
        let clone: CloneParams = p.decode().unwrap();
        assert_eq!(clone.branch, "main");
    }

    #[test]
    fn named_download_defaults() {
        let p = Params::new(json!({"url": "https://x/y", "dest": "~/bin/y"}));
        let d: DownloadParams = p.decode().unwrap();
        assert!(!d.executable);
        assert_eq!(d.extract_member, None);
        assert!(p.is_named());
    }

    #[test]
    fn named_params_reject_unknown_fields() {
        let p = Params::new(json!({"src": "vimrc", "dest": "~/.vimrc", "mode": 1}));
        assert!(p.decode::<SymlinkParams>().is_err());
    }

    #[test]
    fn too_many_positional_values_are_rejected() {
        let p = Params::new(json!(["a", "b", "c"]));
        assert!(p.decode::<CopyParams>().is_err());
    }

    #[test]
    fn validate_rejects_bad_write_template() {
        let p = Params::new(json!({"src": "~/.zshrc", "contents": "{shell}"}));
        let msg = validate(ActionKind::Write, &p).unwrap_err();
        assert!(msg.contains("shell"), "{msg}");
    }

    #[test]
    fn validate_rejects_positional_download() {
        let p = Params::new(json!(["https://example.com/x", "~/x"]));
        let msg = validate(ActionKind::Download, &p).unwrap_err();
        assert_eq!(msg, "download takes named parameters only");
    }

    #[test]
    fn validate_rejects_empty_run() {
        let p = Params::new(json!({"args": []}));
        assert!(validate(ActionKind::Run, &p).is_err());
    }

    #[test]
    fn validate_accepts_positional_run() {
        let p = Params::new(json!([["sh", "-c", "echo {home}"]]));
        validate(ActionKind::Run, &p).unwrap();
    }
}
