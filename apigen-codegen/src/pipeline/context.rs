//! Compilation context passed through pipeline phases.

use apigen_ir::ApiIR;
use apigen_spec::SpecDocument;

use super::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::target::TargetConfig;

/// Context passed through all pipeline phases.
///
/// This struct carries the state of a generation run through each phase,
/// accumulating results and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext<'a> {
    /// The specification document being lowered.
    pub document: &'a SpecDocument,
    /// Configuration of the selected target.
    pub config: &'a TargetConfig,
    /// The lowered IR (populated by LowerPhase).
    pub ir: Option<ApiIR>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CompilationContext<'a> {
    /// Create a new compilation context for a document.
    pub fn new(document: &'a SpecDocument, config: &'a TargetConfig) -> Self {
        Self {
            document,
            config,
            ir: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, kind: DiagnosticKind, phase: &str, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(kind, phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, kind: DiagnosticKind, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(kind, phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the IR out of the context, if LowerPhase produced one.
    pub fn take_ir(&mut self) -> Option<ApiIR> {
        self.ir.take()
    }
}
