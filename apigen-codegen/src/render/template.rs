//! The template trait and template sets.

use super::{RenderContext, RenderError};
use crate::mapper::Collision;

/// What a template renders one file for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The whole API.
    Api,
    /// One tag group, by tag name.
    Tag(String),
    /// One model, by identifier.
    Model(String),
}

/// Result of rendering one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// File content.
    File(String),
    /// File content, plus what the template had to recover from.
    Annotated {
        content: String,
        notes: Vec<RenderNote>,
    },
    /// Nothing to emit for this scope; no file is written.
    Elided,
}

impl Rendered {
    /// File content with the notes collected while rendering it.
    pub fn file(content: String, notes: Vec<RenderNote>) -> Self {
        if notes.is_empty() {
            Rendered::File(content)
        } else {
            Rendered::Annotated { content, notes }
        }
    }

    /// Content to write, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Rendered::File(content) | Rendered::Annotated { content, .. } => Some(content),
            Rendered::Elided => None,
        }
    }
}

/// A non-fatal event met while rendering a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNote {
    /// An identifier was renamed to keep one of the template's namespaces
    /// unique.
    Renamed(Collision),
    /// A type has no exact rendering in this position and was replaced.
    Fallback(String),
}

impl From<Collision> for RenderNote {
    fn from(collision: Collision) -> Self {
        RenderNote::Renamed(collision)
    }
}

impl std::fmt::Display for RenderNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderNote::Renamed(collision) => collision.fmt(f),
            RenderNote::Fallback(message) => f.write_str(message),
        }
    }
}

/// A per-target rendering unit producing one output file per scope.
///
/// Templates must be deterministic: rendering the same context twice yields
/// byte-identical output.
pub trait Template: Send + Sync {
    /// Template name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the file is build scaffolding (package manifests and the like)
    /// rather than API code.
    fn is_supporting(&self) -> bool {
        false
    }

    /// Scopes to render, in output order.
    fn scopes(&self, ctx: &RenderContext<'_>) -> Vec<Scope> {
        let _ = ctx;
        vec![Scope::Api]
    }

    /// Relative, `/`-separated output path for a scope.
    fn path(&self, scope: &Scope, ctx: &RenderContext<'_>) -> String;

    /// Render the file for a scope.
    fn render(&self, scope: &Scope, ctx: &RenderContext<'_>) -> Result<Rendered, RenderError>;
}

/// The ordered templates of a target.
#[derive(Default)]
pub struct TemplateSet {
    templates: Vec<Box<dyn Template>>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template.
    pub fn with(mut self, template: impl Template + 'static) -> Self {
        self.templates.push(Box::new(template));
        self
    }

    pub fn push(&mut self, template: Box<dyn Template>) {
        self.templates.push(template);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Template> {
        self.templates.iter().map(|t| t.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
