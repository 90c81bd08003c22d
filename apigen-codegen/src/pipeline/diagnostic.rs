//! Diagnostic types for the generation pipeline.
//!
//! This module provides types for collecting errors, warnings, and informational
//! messages during pipeline phases and rendering.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// A fatal error that prevents further processing.
    Error,
    /// A warning that doesn't prevent processing but should be addressed.
    Warning,
    /// Informational message about the generation process.
    Info,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A required section is missing or a reference cannot be resolved.
    MalformedSpec,
    /// A path placeholder has no declared parameter.
    UnboundPathParameter,
    /// A schema shape has no precise mapping and fell back to `Any`.
    UnsupportedSchema,
    /// A path component mixes text and a placeholder.
    UnsupportedPathSegment,
    /// An output file failed to render.
    TemplateRender,
    /// Two raw names mapped to the same identifier and were disambiguated.
    IdentifierCollision,
    /// A rendered file could not be written.
    OutputWrite,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::MalformedSpec => "malformed-spec",
            DiagnosticKind::UnboundPathParameter => "unbound-path-parameter",
            DiagnosticKind::UnsupportedSchema => "unsupported-schema",
            DiagnosticKind::UnsupportedPathSegment => "unsupported-path-segment",
            DiagnosticKind::TemplateRender => "template-render",
            DiagnosticKind::IdentifierCollision => "identifier-collision",
            DiagnosticKind::OutputWrite => "output-write",
        };
        f.write_str(name)
    }
}

/// A diagnostic message from a pipeline phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The kind of problem reported.
    pub kind: DiagnosticKind,
    /// The phase that produced this diagnostic.
    pub phase: String,
    /// The diagnostic message.
    pub message: String,
    /// Optional location hint (e.g., "paths./users/{id}.get").
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        kind: DiagnosticKind,
        phase: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(kind: DiagnosticKind, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, phase, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        kind: DiagnosticKind,
        phase: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, kind, phase, message)
    }

    /// Create a new info diagnostic.
    pub fn info(kind: DiagnosticKind, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, kind, phase, message)
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.kind, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error(DiagnosticKind::MalformedSpec, "read", "missing paths");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "read");
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning(DiagnosticKind::UnsupportedSchema, "lower", "no mapping")
            .at("components.schemas.Pet");
        assert_eq!(diag.location.as_deref(), Some("components.schemas.Pet"));
        assert_eq!(
            diag.to_string(),
            "warning[unsupported-schema]: no mapping (at components.schemas.Pet)"
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_serialize() {
        let diag = Diagnostic::info(DiagnosticKind::IdentifierCollision, "lower", "renamed");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["kind"], "identifier_collision");
        assert_eq!(json["severity"], "Info");
    }
}
