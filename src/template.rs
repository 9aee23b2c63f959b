//! Bounded `{name}` interpolation for `write` contents and `run` arguments.
//!
//! Only a fixed set of [`Variable`]s exists, and each call site decides which
//! of them it accepts.  `{{` and `}}` produce literal braces.  Any other
//! placeholder is rejected when the template is parsed, never left in the
//! output unexpanded.
use std::fmt;
use std::path::Path;

use thiserror::Error;

/// A substitution variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// The tool's root directory (`{this_dir}`).
    ThisDir,
    /// The invoking user's home directory (`{home}`).
    Home,
}

impl Variable {
    /// Placeholder name as written between braces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ThisDir => "this_dir",
            Self::Home => "home",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "this_dir" => Some(Self::ThisDir),
            "home" => Some(Self::Home),
            _ => None,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

/// Variables accepted by `write` contents.
pub const WRITE_VARIABLES: &[Variable] = &[Variable::ThisDir, Variable::Home];

/// Variables accepted by `run` arguments.
pub const RUN_VARIABLES: &[Variable] = &[Variable::Home];

/// Errors raised while parsing a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder names a variable outside the accepted set.
    #[error("unknown substitution variable '{{{name}}}' (allowed: {allowed})")]
    UnknownVariable {
        /// The placeholder name.
        name: String,
        /// The accepted placeholders, comma-separated.
        allowed: String,
    },

    /// A `{` was never closed.
    #[error("unclosed '{{' at byte {0}")]
    Unclosed(usize),

    /// A lone `}` appeared outside a placeholder.
    #[error("single '}}' at byte {0} (use '}}}}' for a literal brace)")]
    UnmatchedClose(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(Variable),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Values substituted into a [`Template`].
#[derive(Debug, Clone)]
pub struct Bindings {
    this_dir: String,
    home: String,
}

impl Bindings {
    /// Bind `{this_dir}` and `{home}`.
    #[must_use]
    pub fn new(this_dir: &Path, home: &Path) -> Self {
        Self {
            this_dir: this_dir.display().to_string(),
            home: home.display().to_string(),
        }
    }

    fn value(&self, var: Variable) -> &str {
        match var {
            Variable::ThisDir => &self.this_dir,
            Variable::Home => &self.home,
        }
    }
}

impl Template {
    /// Parse `source`, accepting only the variables in `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] on an unknown or disallowed variable, an
    /// unclosed `{`, or a stray `}`.
    pub fn parse(source: &str, allowed: &[Variable]) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, n)| n == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, n)| n == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedClose(pos)),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    let var = Variable::from_name(&name)
                        .filter(|v| allowed.contains(v))
                        .ok_or_else(|| TemplateError::UnknownVariable {
                            name: name.clone(),
                            allowed: allowed
                                .iter()
                                .map(ToString::to_string)
                                .collect::<Vec<_>>()
                                .join(", "),
                        })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Var(var));
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Substitute `bindings` into the template.
    #[must_use]
    pub fn render(&self, bindings: &Bindings) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Var(var) => bindings.value(*var),
            })
            .collect()
    }
}
