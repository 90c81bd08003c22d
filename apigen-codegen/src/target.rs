//! Target configuration.
//!
//! A target is data, not a subtype: a [`TargetConfig`] describing the
//! language's lexical rules plus a [`TemplateSet`] of output files.

use crate::{language::NamingConvention, render::TemplateSet};

/// Bracket syntax marking a parameter placeholder in a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDelimiter {
    pub open: String,
    pub close: String,
}

impl ParamDelimiter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// The placeholder name if `component` is exactly one placeholder.
    pub fn placeholder<'a>(&self, component: &'a str) -> Option<&'a str> {
        if self.open.is_empty() {
            return None;
        }
        let inner = component
            .strip_prefix(self.open.as_str())?
            .strip_suffix(self.close.as_str())?;
        let nested = inner.contains(self.open.as_str())
            || (!self.close.is_empty() && inner.contains(self.close.as_str()));
        (!inner.is_empty() && !nested).then_some(inner)
    }

    /// Whether `component` contains an opening delimiter anywhere.
    pub fn mentions_placeholder(&self, component: &str) -> bool {
        !self.open.is_empty() && component.contains(self.open.as_str())
    }
}

impl Default for ParamDelimiter {
    fn default() -> Self {
        Self::new("{", "}")
    }
}

/// Per-target configuration.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Target name (e.g. "haskell-servant").
    pub name: String,
    /// Identifier rules of the target language.
    pub naming: NamingConvention,
    /// Additional words the mapper must avoid, on top of the language's keywords.
    pub reserved_words: Vec<String>,
    /// How path parameters are marked in the specification's routes.
    pub path_param_delimiter: ParamDelimiter,
    /// Text rendered for a root path; may be empty.
    pub root_marker: String,
    /// Package name override; derived from the document title when unset.
    pub package: Option<String>,
}

impl TargetConfig {
    pub fn new(name: impl Into<String>, naming: NamingConvention) -> Self {
        Self {
            name: name.into(),
            naming,
            reserved_words: Vec::new(),
            path_param_delimiter: ParamDelimiter::default(),
            root_marker: String::new(),
            package: None,
        }
    }

    pub fn reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn root_marker(mut self, marker: impl Into<String>) -> Self {
        self.root_marker = marker.into();
        self
    }

    pub fn path_param_delimiter(mut self, delimiter: ParamDelimiter) -> Self {
        self.path_param_delimiter = delimiter;
        self
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

/// A target: configuration plus the templates to render.
pub struct Target {
    pub config: TargetConfig,
    pub templates: TemplateSet,
}

impl Target {
    pub fn new(config: TargetConfig, templates: TemplateSet) -> Self {
        Self { config, templates }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}
