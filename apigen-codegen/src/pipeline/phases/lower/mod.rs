//! Lower phase - builds the IR from the specification document.
//!
//! Lowering runs in two passes over the document:
//!
//! 1. Every named schema is declared in the model table under its mapped
//!    identifier, so references resolve regardless of declaration order and
//!    cycles are plain name lookups.
//! 2. Schemas are lowered into models, then operations are lowered in
//!    document order: paths are parsed, placeholders bound to declared path
//!    parameters, and the segments normalized.
//!
//! Inline object schemas are hoisted into named models as they are met.

mod models;
mod operations;
mod paths;
mod types;

use std::collections::HashMap;

use apigen_ir::{ApiIR, ApiMeta, ModelTable};
use apigen_spec::SpecReader;
use eyre::Result;

use crate::{
    mapper::{Identifier, Mapper},
    pipeline::{BuildError, CompilationContext, Diagnostic, DiagnosticKind, Phase},
    target::TargetConfig,
};

const PHASE: &str = "lower";

/// Phase that transforms the specification document into the IR.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    fn description(&self) -> &'static str {
        "Transform the specification into the API IR"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let reader = SpecReader::new(ctx.document).map_err(BuildError::from)?;
        let mut lowerer = Lowerer::new(reader, ctx.config);

        let result = lowerer.lower();
        ctx.diagnostics.append(&mut lowerer.diagnostics);

        let ir = match result {
            Ok(ir) => ir,
            Err(error) => {
                ctx.add_diagnostic(error.to_diagnostic(PHASE));
                return Err(error.into());
            }
        };
        tracing::debug!(
            operations = ir.operations.len(),
            models = ir.models.len(),
            "lowered specification"
        );
        ctx.ir = Some(ir);
        Ok(())
    }
}

/// Lowering state for one run.
struct Lowerer<'a> {
    reader: SpecReader<'a>,
    config: &'a TargetConfig,
    mapper: Mapper<'a>,
    models: ModelTable,
    /// Raw schema name → model identifier for every named schema.
    schema_names: HashMap<&'a str, String>,
    /// Nesting depth of non-schema `$ref` targets being inlined.
    inline_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lowerer<'a> {
    fn new(reader: SpecReader<'a>, config: &'a TargetConfig) -> Self {
        Self {
            reader,
            config,
            mapper: Mapper::new(config),
            models: ModelTable::new(),
            schema_names: HashMap::new(),
            inline_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    fn lower(&mut self) -> Result<ApiIR, BuildError> {
        let meta = self.lower_meta();

        self.declare_models();
        self.lower_models();
        let operations = self.lower_operations()?;

        Ok(ApiIR {
            meta,
            models: std::mem::take(&mut self.models),
            operations,
        })
    }

    fn lower_meta(&self) -> ApiMeta {
        let info = self.reader.info();
        ApiMeta {
            title: info.title.to_string(),
            version: info.version.to_string(),
            description: info.description.map(str::to_string),
        }
    }

    fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>, location: &str) {
        self.diagnostics
            .push(Diagnostic::warning(kind, PHASE, message).at(location));
    }

    /// Record a collision notice, if the identifier was renamed.
    fn note(&mut self, identifier: &Identifier, location: &str) {
        if let Some(collision) = &identifier.collision {
            self.diagnostics.push(
                Diagnostic::info(DiagnosticKind::IdentifierCollision, PHASE, collision.to_string())
                    .at(location),
            );
        }
    }
}

#[cfg(test)]
mod tests;
