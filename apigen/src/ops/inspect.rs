//! Inspect operation - summarize the IR of a document.

use apigen_codegen::{GenerationFailure, LoweredApi, TargetConfig, build_ir};
use apigen_ir::{ApiIR, Model, ModelKind};
use apigen_spec::SpecDocument;

use crate::reports::{InspectReport, ModelLine, RouteLine};

/// Build the IR of a document.
pub fn lower(document: &SpecDocument, config: &TargetConfig) -> Result<ApiIR, GenerationFailure> {
    build_ir(document, config).map(|LoweredApi { ir, .. }| ir)
}

/// Execute the inspect operation.
pub fn inspect(ir: &ApiIR) -> InspectReport {
    let routes = ir
        .operations
        .iter()
        .map(|op| RouteLine {
            method: op.method.to_string(),
            route: op.path.to_route(),
            operation_id: op.id.clone(),
            deprecated: op.deprecated,
        })
        .collect();

    let models = ir
        .models
        .iter()
        .map(|model| ModelLine {
            name: model.name.clone(),
            shape: shape(model),
        })
        .collect();

    InspectReport {
        title: ir.meta.title.clone(),
        version: ir.meta.version.clone(),
        description: ir.meta.description.clone(),
        routes,
        models,
    }
}

fn shape(model: &Model) -> String {
    fn count(n: usize, what: &str) -> String {
        format!("{n} {what}{}", if n == 1 { "" } else { "s" })
    }

    match &model.kind {
        ModelKind::Record(fields) => format!("record ({})", count(fields.len(), "field")),
        ModelKind::Enum(values) => format!("enum ({})", values.join(" | ")),
        ModelKind::Union(variants) => match &model.discriminator {
            Some(discriminator) => format!(
                "union of {} by '{}'",
                variants.join(", "),
                discriminator.property
            ),
            None => format!("union of {}", variants.join(", ")),
        },
        ModelKind::Alias(_) => "alias".to_string(),
    }
}
