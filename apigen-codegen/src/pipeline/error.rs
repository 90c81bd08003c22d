//! Fatal IR construction errors.

use thiserror::Error;

use super::{Diagnostic, DiagnosticKind};

/// An error that aborts IR construction.
///
/// Phases return these wrapped in an [`eyre::Report`]; callers can recover
/// the typed error with `downcast_ref::<BuildError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("malformed specification: {message}")]
    MalformedSpec {
        message: String,
        location: Option<String>,
    },

    #[error("path placeholder '{name}' in {method} {path} has no declared path parameter")]
    UnboundPathParameter {
        method: String,
        path: String,
        name: String,
    },
}

impl BuildError {
    pub fn malformed(message: impl Into<String>) -> Self {
        BuildError::MalformedSpec {
            message: message.into(),
            location: None,
        }
    }

    pub fn malformed_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        BuildError::MalformedSpec {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            BuildError::MalformedSpec { .. } => DiagnosticKind::MalformedSpec,
            BuildError::UnboundPathParameter { .. } => DiagnosticKind::UnboundPathParameter,
        }
    }

    /// Convert to an error diagnostic attributed to `phase`.
    pub fn to_diagnostic(&self, phase: &str) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.kind(), phase, self.to_string());
        match self {
            BuildError::MalformedSpec {
                location: Some(location),
                ..
            } => diagnostic.at(location.clone()),
            BuildError::MalformedSpec { location: None, .. } => diagnostic,
            BuildError::UnboundPathParameter { method, path, .. } => {
                diagnostic.at(format!("paths.{path}.{}", method.to_ascii_lowercase()))
            }
        }
    }
}

impl From<Box<apigen_spec::Error>> for BuildError {
    fn from(error: Box<apigen_spec::Error>) -> Self {
        match *error {
            apigen_spec::Error::MalformedSpec { section, message } if !section.is_empty() => {
                BuildError::malformed_at(message, section)
            }
            other => BuildError::malformed(other.to_string()),
        }
    }
}
