//! Generate operation - code generation from a specification document.

use std::path::PathBuf;

use apigen_codegen::{GenerateOptions, Generator, Target, pipeline::SnapshotPlugin};
use apigen_core::{DirectorySink, MemorySink, OutputSink};
use apigen_spec::{SpecDocument, SpecReader};

use crate::reports::{GenerateOutcome, GenerateReport, PreviewFile};

/// Resolved settings for one generate run.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Output directory for generated code.
    pub output_dir: PathBuf,
    pub options: GenerateOptions,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Where to write per-phase pipeline snapshots.
    pub snapshot_dir: Option<PathBuf>,
}

/// Execute the generate operation.
///
/// Failures are part of the report; the caller decides the exit status.
pub fn generate(
    document: &SpecDocument,
    target: &Target,
    settings: &GenerateSettings,
) -> GenerateReport {
    let mut generator = Generator::new(target).options(settings.options);
    if let Some(dir) = &settings.snapshot_dir {
        generator = generator.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let mut memory = MemorySink::new();
    let mut directory = DirectorySink::new(&settings.output_dir);
    let sink: &mut dyn OutputSink = if settings.dry_run {
        &mut memory
    } else {
        &mut directory
    };

    tracing::debug!(
        target = target.name(),
        output = %settings.output_dir.display(),
        dry_run = settings.dry_run,
        "generating"
    );

    let (diagnostics, outcome) = match generator.generate(document, sink) {
        Ok(result) if settings.dry_run => {
            let files = memory
                .into_files()
                .into_iter()
                .map(|(path, content)| PreviewFile { path, content })
                .collect();
            (result.diagnostics, GenerateOutcome::Preview { files })
        }
        Ok(result) => (
            result.diagnostics,
            GenerateOutcome::Written {
                output_dir: settings.output_dir.clone(),
                files_written: result.files_written,
                files_skipped: result.files_skipped,
                files_elided: result.files_elided,
                snapshot_dir: settings.snapshot_dir.clone(),
            },
        ),
        Err(failure) => (
            failure.diagnostics,
            GenerateOutcome::Failed {
                error: format!("{:#}", failure.error),
                files_written: failure.files_written,
            },
        ),
    };

    GenerateReport {
        api: api_heading(document),
        target: target.name().to_string(),
        diagnostics,
        outcome,
    }
}

/// `<title> v<version>` for documents with a readable `info` section.
fn api_heading(document: &SpecDocument) -> Option<String> {
    let reader = SpecReader::new(document).ok()?;
    let info = reader.info();
    Some(format!("{} v{}", info.title, info.version))
}
