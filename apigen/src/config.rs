//! `apigen.toml` loading.
//!
//! Every setting is optional; command-line flags override file values.
//!
//! ```toml
//! [generate]
//! target = "haskell-servant"
//! output = "generated"
//! strict = false
//! supporting-files = true
//! parallel = false
//!
//! [target]
//! package = "petstore"
//! reserved-words = ["extra"]
//! root-marker = ""
//! path-param-delimiter = ["{", "}"]
//! ```

use std::path::{Path, PathBuf};

use apigen_codegen::{ParamDelimiter, TargetConfig};
use eyre::{Context, Result};
use serde::Deserialize;

use crate::targets::TargetKind;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "apigen.toml";

/// Parsed `apigen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ApigenToml {
    pub generate: GenerateSection,
    pub target: TargetSection,
}

/// The `[generate]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerateSection {
    pub target: Option<TargetKind>,
    pub output: Option<PathBuf>,
    pub strict: Option<bool>,
    pub supporting_files: Option<bool>,
    pub parallel: Option<bool>,
}

/// The `[target]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TargetSection {
    pub package: Option<String>,
    pub reserved_words: Vec<String>,
    pub root_marker: Option<String>,
    pub path_param_delimiter: Option<(String, String)>,
}

impl ApigenToml {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("invalid configuration")
    }

    /// Load a configuration file.
    ///
    /// A missing file is an error only when the path was given explicitly;
    /// otherwise defaults apply.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::parse(&content).wrap_err_with(|| format!("in {}", path.display()))
    }
}

impl TargetSection {
    /// Apply the table on top of a target's default configuration.
    pub fn apply(&self, mut config: TargetConfig) -> TargetConfig {
        if let Some(package) = &self.package {
            config = config.package(package.clone());
        }
        config = config.reserved_words(self.reserved_words.iter().cloned());
        if let Some(marker) = &self.root_marker {
            config = config.root_marker(marker.clone());
        }
        if let Some((open, close)) = &self.path_param_delimiter {
            config = config.path_param_delimiter(ParamDelimiter::new(open.clone(), close.clone()));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ApigenToml::parse(
            r#"
            [generate]
            target = "haskell-servant"
            output = "generated"
            strict = true
            supporting-files = false

            [target]
            package = "petstore"
            reserved-words = ["extra"]
            root-marker = "\"index\""
            path-param-delimiter = [":", ""]
            "#,
        )
        .unwrap();

        assert_eq!(config.generate.target, Some(TargetKind::HaskellServant));
        assert_eq!(config.generate.output, Some(PathBuf::from("generated")));
        assert_eq!(config.generate.strict, Some(true));
        assert_eq!(config.generate.supporting_files, Some(false));
        assert_eq!(config.generate.parallel, None);

        let target = config.target.apply(TargetKind::HaskellServant.config());
        assert_eq!(target.package.as_deref(), Some("petstore"));
        assert!(target.reserved_words.iter().any(|w| w == "extra"));
        assert_eq!(target.root_marker, "\"index\"");
        assert_eq!(target.path_param_delimiter, ParamDelimiter::new(":", ""));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ApigenToml::parse("").unwrap(), ApigenToml::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ApigenToml::parse("[generate]\nlanguage = \"rust\"\n").is_err());
        assert!(ApigenToml::parse("[generate]\ntarget = \"cobol\"\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        assert_eq!(ApigenToml::load(&path, false).unwrap(), ApigenToml::default());
        assert!(ApigenToml::load(&path, true).is_err());

        std::fs::write(&path, "[target]\npackage = \"pets\"\n").unwrap();
        let loaded = ApigenToml::load(&path, true).unwrap();
        assert_eq!(loaded.target.package.as_deref(), Some("pets"));
    }
}
