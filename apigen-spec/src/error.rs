use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for apigen-spec operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Keeps the raw document text and its filename so parse errors can point
/// at the offending location.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a JSON error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = self
            .offset_of(source.line(), source.column())
            .map(|offset| SourceSpan::from(offset..offset));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: source.to_string(),
        })
    }

    /// Create a parse error from a YAML error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from(loc.index()..loc.index()));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: source.to_string(),
        })
    }

    /// Byte offset of a 1-based line/column pair.
    fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(line - 1)
            .map(str::len)
            .sum();
        Some((line_start + column.saturating_sub(1)).min(self.src.len()))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(apigen::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse specification: {message}")]
    #[diagnostic(code(apigen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("unsupported specification format '{extension}'")]
    #[diagnostic(
        code(apigen::unsupported_format),
        help("use a .json, .yaml or .yml document")
    )]
    UnsupportedFormat { extension: String },

    #[error("malformed specification: {message}")]
    #[diagnostic(
        code(apigen::malformed_spec),
        help("the document must have top-level 'info' and 'paths' objects")
    )]
    MalformedSpec { section: String, message: String },

    #[error("unresolved reference '{reference}'")]
    #[diagnostic(
        code(apigen::unresolved_ref),
        help("only local references of the form '#/components/...' are supported")
    )]
    UnresolvedReference { reference: String },
}

impl Error {
    /// Create a malformed specification error for a section.
    pub fn malformed(section: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::MalformedSpec {
            section: section.into(),
            message: message.into(),
        })
    }

    pub fn unresolved(reference: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnresolvedReference {
            reference: reference.into(),
        })
    }
}
