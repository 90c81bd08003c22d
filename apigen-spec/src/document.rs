//! Loading specification documents.

use std::path::Path;

use serde_json::Value;

use crate::{Error, Result, SourceContext};

/// Serialized format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(SpecFormat::Json),
            "yaml" | "yml" => Ok(SpecFormat::Yaml),
            _ => Err(Box::new(Error::UnsupportedFormat { extension })),
        }
    }
}

/// A parsed specification tree.
///
/// Both JSON and YAML documents parse into the same [`Value`] tree, with
/// object keys kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    root: Value,
}

impl SpecDocument {
    /// Wrap an already-parsed tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let root = serde_json::from_str(content).map_err(|e| ctx.json_error(e))?;
        Ok(Self { root })
    }

    pub fn from_yaml_str(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let root = serde_yaml::from_str(content).map_err(|e| ctx.yaml_error(e))?;
        Ok(Self { root })
    }

    /// Parse a string in the given format.
    pub fn parse(content: &str, format: SpecFormat, filename: &str) -> Result<Self> {
        match format {
            SpecFormat::Json => Self::from_json_str(content, filename),
            SpecFormat::Yaml => Self::from_yaml_str(content, filename),
        }
    }

    /// Read and parse a document, choosing the format by extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SpecFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        Self::parse(&content, format, &filename)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}
