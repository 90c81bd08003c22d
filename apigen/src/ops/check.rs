//! Check operation - validate a document by building its IR.

use std::path::Path;

use apigen_codegen::{GenerationFailure, LoweredApi, TargetConfig, build_ir};
use apigen_spec::SpecDocument;

use crate::reports::CheckReport;

/// Execute the check operation.
pub fn check(spec_path: &Path, document: &SpecDocument, config: &TargetConfig) -> CheckReport {
    match build_ir(document, config) {
        Ok(LoweredApi { ir, diagnostics }) => CheckReport {
            spec_path: spec_path.to_path_buf(),
            diagnostics,
            error: None,
            operation_count: ir.operations.len(),
            model_count: ir.models.len(),
        },
        Err(failure) => failure_report(spec_path, failure),
    }
}

/// Report for a document whose IR could not be built.
pub fn failure_report(spec_path: &Path, failure: GenerationFailure) -> CheckReport {
    CheckReport {
        spec_path: spec_path.to_path_buf(),
        diagnostics: failure.diagnostics,
        error: Some(format!("{:#}", failure.error)),
        operation_count: 0,
        model_count: 0,
    }
}
