//! Read phase - checks that the document can be read.

use apigen_spec::SpecReader;
use eyre::Result;

use crate::pipeline::{BuildError, CompilationContext, Phase};

/// Phase that opens a [`SpecReader`] over the document.
///
/// Fails with [`BuildError::MalformedSpec`] when a required top-level
/// section is missing or a path item cannot be resolved.
pub struct ReadPhase;

impl Phase for ReadPhase {
    fn name(&self) -> &'static str {
        "read"
    }

    fn description(&self) -> &'static str {
        "Check the specification's required sections"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let reader = SpecReader::new(ctx.document).map_err(BuildError::from)?;
        let operations = reader.operations().map_err(BuildError::from)?;

        tracing::debug!(
            title = reader.info().title,
            operations = operations.len(),
            schemas = reader.schemas().len(),
            "read specification"
        );
        Ok(())
    }
}
