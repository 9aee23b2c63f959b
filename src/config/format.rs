//! Configuration file formats, selected by extension.
use std::path::Path;

use crate::error::ConfigError;

/// A supported configuration syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `configs.toml`
    Toml,
    /// `configs.yml` / `configs.yaml`
    Yaml,
}

impl Format {
    /// File names probed, in order, when locating the configuration.
    pub const CANDIDATES: [&'static str; 3] = ["configs.toml", "configs.yml", "configs.yaml"];

    /// Pick the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yml" | "yaml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Parse `content` into a format-neutral value tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] with the parser's diagnostic.
    pub fn parse(self, content: &str, path: &Path) -> Result<serde_json::Value, ConfigError> {
        let parsed = match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extension_selects_format() {
        assert_eq!(Format::from_path(Path::new("a/configs.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::from_path(Path::new("configs.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("configs.yaml")).unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path(Path::new("configs.json")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn toml_and_yaml_produce_the_same_tree() {
        let toml_src = r#"vim = [{ symlink = ["vimrc", "~/.vimrc"] }]"#;
        let yaml_src = "vim:\n  - symlink: [vimrc, ~/.vimrc]\n";
        let from_toml = Format::Toml.parse(toml_src, Path::new("c.toml")).unwrap();
        let from_yaml = Format::Yaml.parse(yaml_src, Path::new("c.yml")).unwrap();
        let expected = json!({"vim": [{"symlink": ["vimrc", "~/.vimrc"]}]});
        assert_eq!(from_toml, expected);
        assert_eq!(from_yaml, expected);
    }

    #[test]
    fn syntax_error_names_the_file() {
        let err = Format::Toml
            .parse("vim = [", Path::new("/tool/configs.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("/tool/configs.toml"));
    }
}
