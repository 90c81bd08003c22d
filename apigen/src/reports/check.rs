//! Check command report data structures.

use std::path::PathBuf;

use apigen_codegen::pipeline::Diagnostic;

use super::{
    diagnostics::render_diagnostics,
    output::{Output, Report},
};

/// Report data from validating a document.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the document.
    pub spec_path: PathBuf,
    /// Every diagnostic of the IR build.
    pub diagnostics: Vec<Diagnostic>,
    /// The fatal error, if the IR could not be built.
    pub error: Option<String>,
    pub operation_count: usize,
    pub model_count: usize,
}

impl CheckReport {
    /// Whether the check passed (the IR was built).
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(&self.diagnostics, out);
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        match &self.error {
            Some(error) => out.error(error),
            None => {
                out.preformatted(&format!("✓ {} is valid", self.spec_path.display()));
                out.preformatted(&format!(
                    "  {} operation{}, {} model{}",
                    self.operation_count,
                    plural(self.operation_count),
                    self.model_count,
                    plural(self.model_count)
                ));
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            spec_path: PathBuf::from("petstore.yaml"),
            diagnostics: Vec::new(),
            error: None,
            operation_count: 1,
            model_count: 3,
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec!["✓ petstore.yaml is valid", "  1 operation, 3 models"]
        );
    }
}
