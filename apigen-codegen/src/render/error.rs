//! Rendering errors.

use thiserror::Error;

/// A failure rendering one output file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("model '{name}' referenced from {context} does not exist")]
    MissingModel { name: String, context: String },

    #[error("template '{template}' failed: {message}")]
    Template { template: String, message: String },
}

impl RenderError {
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Template {
            template: template.into(),
            message: message.into(),
        }
    }
}
