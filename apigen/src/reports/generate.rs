//! Generate command report data structures.

use std::path::PathBuf;

use apigen_codegen::pipeline::Diagnostic;

use super::{
    diagnostics::render_diagnostics,
    output::{Output, Report},
};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// `<title> v<version>` of the document, when it could be read.
    pub api: Option<String>,
    /// Target name.
    pub target: String,
    /// Every diagnostic of the run.
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: GenerateOutcome,
}

/// How the run ended.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// Files were written to disk.
    Written {
        output_dir: PathBuf,
        files_written: Vec<String>,
        files_skipped: Vec<String>,
        files_elided: Vec<String>,
        /// Where pipeline snapshots went, if requested.
        snapshot_dir: Option<PathBuf>,
    },
    /// Dry-run preview.
    Preview { files: Vec<PreviewFile> },
    /// The run failed; `files_written` lists anything already written.
    Failed {
        error: String,
        files_written: Vec<String>,
    },
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl GenerateReport {
    pub fn succeeded(&self) -> bool {
        !matches!(self.outcome, GenerateOutcome::Failed { .. })
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(&self.diagnostics, out);

        match &self.outcome {
            GenerateOutcome::Written {
                output_dir,
                files_written,
                files_skipped,
                files_elided,
                snapshot_dir,
            } => {
                if let Some(dir) = snapshot_dir {
                    out.key_value("Pipeline snapshots written to", &dir.display().to_string());
                    out.newline();
                }
                if let Some(api) = &self.api {
                    out.preformatted(api);
                }
                out.key_value("Target", &self.target);
                out.newline();

                out.section(&format!("Generated in {}", output_dir.display()));
                for path in files_written {
                    out.added_item(path);
                }
                if !files_skipped.is_empty() {
                    out.newline();
                    out.section("Kept existing files");
                    for path in files_skipped {
                        out.list_item(path);
                    }
                }
                if !files_elided.is_empty() {
                    out.newline();
                    out.section("Nothing to generate");
                    for path in files_elided {
                        out.list_item(path);
                    }
                }
            }
            GenerateOutcome::Preview { files } => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
            GenerateOutcome::Failed {
                error,
                files_written,
            } => {
                out.error(error);
                if !files_written.is_empty() {
                    out.section("Written before the failure");
                    for path in files_written {
                        out.list_item(path);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use apigen_codegen::pipeline::DiagnosticKind;

    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            api: Some("Pet Store v1".into()),
            target: "haskell-servant".into(),
            diagnostics: vec![
                Diagnostic::warning(DiagnosticKind::UnsupportedSchema, "lower", "unsupported")
                    .at("components.schemas.Blob"),
            ],
            outcome: GenerateOutcome::Written {
                output_dir: PathBuf::from("out"),
                files_written: vec!["lib/PetStore/API.hs".into()],
                files_skipped: Vec::new(),
                files_elided: vec!["lib/PetStore/Types.hs".into()],
                snapshot_dir: None,
            },
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(report.succeeded());
        assert_eq!(
            out.lines,
            vec![
                "warning: [unsupported-schema] unsupported\n  --> components.schemas.Blob",
                "Pet Store v1",
                "Target: haskell-servant",
                "",
                "Generated in out:",
                "+ lib/PetStore/API.hs",
                "",
                "Nothing to generate:",
                "- lib/PetStore/Types.hs",
            ]
        );
    }

    #[test]
    fn test_render_failed() {
        let report = GenerateReport {
            api: None,
            target: "haskell-servant".into(),
            diagnostics: Vec::new(),
            outcome: GenerateOutcome::Failed {
                error: "1 file(s) failed to render; nothing was written".into(),
                files_written: Vec::new(),
            },
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(!report.succeeded());
        assert_eq!(
            out.lines,
            vec!["error: 1 file(s) failed to render; nothing was written"]
        );
    }
}
