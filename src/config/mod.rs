//! Configuration loading: program name -> ordered action list.
pub mod format;
pub mod params;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ConfigError;
pub use format::Format;
pub use params::{ActionKind, Params};

/// One declared step of a program.
///
/// The kind is kept as written: resolving it to an executor happens only
/// when the action is reached, so an unknown kind does not prevent earlier
/// actions from running.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAction {
    /// Declared kind name.
    pub kind: String,
    /// Positional or named parameters.
    pub params: Params,
}

/// The loaded configuration document.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the configuration was read from.
    pub path: PathBuf,
    /// Programs, iterated in lexicographic order.
    pub programs: BTreeMap<String, Vec<RawAction>>,
}

impl Config {
    /// Find the configuration file under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if none of the candidate names exist.
    pub fn locate(root: &Path) -> Result<PathBuf, ConfigError> {
        Format::CANDIDATES
            .iter()
            .map(|name| root.join(name))
            .find(|p| p.is_file())
            .ok_or_else(|| ConfigError::NotFound {
                root: root.display().to_string(),
            })
    }

    /// Read and shape-check the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, is not
    /// a mapping of program names to action lists, or declares parameters
    /// that do not fit a known action kind.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let value = format.parse(&content, path)?;
        let mut config = Self::from_value(value, &path.display().to_string())?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Shape-check an already parsed document.
    ///
    /// `origin` names the document in error messages.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_value(value: Value, origin: &str) -> Result<Self, ConfigError> {
        let top = match value {
            Value::Object(top) => top,
            other => {
                return Err(ConfigError::NotAMapping {
                    path: origin.to_string(),
                    found: value_kind(&other),
                });
            }
        };

        let mut programs = BTreeMap::new();
        for (program, actions) in top {
            let entries = match actions {
                Value::Array(entries) => entries,
                other => {
                    return Err(ConfigError::InvalidProgram {
                        program,
                        message: format!("expected a list of actions, found {}", value_kind(&other)),
                    });
                }
            };
            let actions = entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| parse_action(&program, i + 1, entry))
                .collect::<Result<Vec<_>, _>>()?;
            programs.insert(program, actions);
        }

        Ok(Self {
            path: PathBuf::new(),
            programs,
        })
    }

    /// Action list of `name`, if configured.
    #[must_use]
    pub fn program(&self, name: &str) -> Option<&[RawAction]> {
        self.programs.get(name).map(Vec::as_slice)
    }

    /// All program names in lexicographic order.
    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }
}

fn parse_action(program: &str, index: usize, entry: Value) -> Result<RawAction, ConfigError> {
    let invalid = |kind: &str, message: String| ConfigError::InvalidAction {
        program: program.to_string(),
        index,
        kind: kind.to_string(),
        message,
    };

    let map = match entry {
        Value::Object(map) => map,
        other => {
            return Err(invalid(
                "?",
                format!("expected a single-key mapping, found {}", value_kind(&other)),
            ));
        }
    };
    if map.len() != 1 {
        return Err(invalid(
            "?",
            format!("expected exactly one action kind, found {} keys", map.len()),
        ));
    }
    let Some((kind, params)) = map.into_iter().next() else {
        return Err(invalid("?", "empty action".to_string()));
    };
    if !matches!(params, Value::Array(_) | Value::Object(_)) {
        return Err(invalid(
            &kind,
            format!(
                "parameters must be a list or a mapping, found {}",
                value_kind(&params)
            ),
        ));
    }

    let params = Params::new(params);
    if let Ok(known) = kind.parse::<ActionKind>() {
        params::validate(known, &params).map_err(|message| invalid(&kind, message))?;
    }
    Ok(RawAction { kind, params })
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
