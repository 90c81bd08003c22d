//! Generation orchestrator.
//!
//! Sequences one run: the pipeline builds the IR (all or nothing), templates
//! render against it (failures isolated per file), and rendered files go to
//! an [`OutputSink`].

use apigen_core::{OutputSink, WriteResult};
use apigen_ir::ApiIR;
use apigen_spec::SpecDocument;
use eyre::eyre;

use crate::{
    pipeline::{CompilationContext, Diagnostic, DiagnosticKind, Pipeline, Plugin, Severity},
    render::{RenderContext, RenderNote, RenderOptions, Rendered, render_all},
    target::{Target, TargetConfig},
};

const RENDER_PHASE: &str = "render";
const WRITE_PHASE: &str = "write";

/// Per-run generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Abort without writing anything if any template fails to render.
    pub strict: bool,
    /// Render supporting files (package manifests, build scaffolding).
    pub supporting_files: bool,
    /// Render files in parallel.
    pub parallel: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            supporting_files: true,
            parallel: false,
        }
    }
}

/// A completed run.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Paths written, in write order.
    pub files_written: Vec<String>,
    /// Paths the sink declined to overwrite.
    pub files_skipped: Vec<String>,
    /// Paths whose template had nothing to emit.
    pub files_elided: Vec<String>,
    /// Every diagnostic of the run, in the order produced.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationResult {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// A failed run, with everything recorded before the failure.
pub struct GenerationFailure {
    pub error: eyre::Report,
    pub diagnostics: Vec<Diagnostic>,
    /// Paths written before the failure; always empty for IR failures.
    pub files_written: Vec<String>,
}

impl GenerationFailure {
    fn new(error: eyre::Report, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            error,
            diagnostics,
            files_written: Vec::new(),
        }
    }
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::fmt::Debug for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationFailure")
            .field("error", &self.error)
            .field("diagnostics", &self.diagnostics)
            .field("files_written", &self.files_written)
            .finish()
    }
}

impl std::error::Error for GenerationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.error)
    }
}

/// The IR of a document plus the diagnostics produced building it.
#[derive(Debug, Clone)]
pub struct LoweredApi {
    pub ir: ApiIR,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs generation for one target.
///
/// # Example
///
/// ```ignore
/// let result = Generator::new(&target)
///     .options(GenerateOptions { strict: true, ..Default::default() })
///     .plugin(SnapshotPlugin::with_output_dir(".apigen/debug"))
///     .generate(&document, &mut DirectorySink::new("generated"))?;
/// ```
pub struct Generator<'t> {
    target: &'t Target,
    options: GenerateOptions,
    pipeline: Pipeline,
}

impl<'t> Generator<'t> {
    pub fn new(target: &'t Target) -> Self {
        Self {
            target,
            options: GenerateOptions::default(),
            pipeline: Pipeline::new(),
        }
    }

    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a pipeline plugin.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.pipeline = self.pipeline.plugin(plugin);
        self
    }

    pub fn boxed_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.pipeline = self.pipeline.boxed_plugin(plugin);
        self
    }

    /// Build the IR without rendering.
    pub fn build_ir(&self, document: &SpecDocument) -> Result<LoweredApi, GenerationFailure> {
        lower(&self.pipeline, document, &self.target.config)
    }

    /// Build the IR, render every template and write the results to `sink`.
    pub fn generate(
        &self,
        document: &SpecDocument,
        sink: &mut dyn OutputSink,
    ) -> Result<GenerationResult, GenerationFailure> {
        let LoweredApi {
            ir,
            mut diagnostics,
        } = self.build_ir(document)?;

        let ctx = RenderContext::new(&ir, &self.target.config);
        let render_options = RenderOptions {
            supporting_files: self.options.supporting_files,
            parallel: self.options.parallel,
        };
        let rendered = render_all(&self.target.templates, &ctx, render_options);

        let failure_severity = if self.options.strict {
            Severity::Error
        } else {
            Severity::Warning
        };
        let mut failed = 0;
        for file in &rendered {
            match &file.result {
                Err(error) => {
                    failed += 1;
                    diagnostics.push(
                        Diagnostic::new(
                            failure_severity,
                            DiagnosticKind::TemplateRender,
                            RENDER_PHASE,
                            error.to_string(),
                        )
                        .at(file.path.clone()),
                    );
                }
                Ok(Rendered::Annotated { notes, .. }) => {
                    diagnostics.extend(notes.iter().map(|note| {
                        let diagnostic = match note {
                            RenderNote::Renamed(_) => Diagnostic::info(
                                DiagnosticKind::IdentifierCollision,
                                RENDER_PHASE,
                                note.to_string(),
                            ),
                            RenderNote::Fallback(_) => Diagnostic::warning(
                                DiagnosticKind::UnsupportedSchema,
                                RENDER_PHASE,
                                note.to_string(),
                            ),
                        };
                        diagnostic.at(file.path.clone())
                    }));
                }
                Ok(_) => {}
            }
        }

        if self.options.strict && failed > 0 {
            return Err(GenerationFailure::new(
                eyre!("{failed} file(s) failed to render; nothing was written"),
                diagnostics,
            ));
        }

        let mut result = GenerationResult::default();
        for file in rendered {
            let content = match file.result {
                Ok(Rendered::File(content) | Rendered::Annotated { content, .. }) => content,
                Ok(Rendered::Elided) => {
                    tracing::debug!(path = %file.path, "elided");
                    result.files_elided.push(file.path);
                    continue;
                }
                Err(_) => continue,
            };

            match sink.write_file(&file.path, &content) {
                Ok(WriteResult::Written) => result.files_written.push(file.path),
                Ok(WriteResult::Skipped) => result.files_skipped.push(file.path),
                Err(error) => diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::OutputWrite,
                        WRITE_PHASE,
                        format!("failed to write file: {error}"),
                    )
                    .at(file.path),
                ),
            }
        }

        tracing::debug!(
            written = result.files_written.len(),
            skipped = result.files_skipped.len(),
            elided = result.files_elided.len(),
            "generation complete"
        );
        result.diagnostics = diagnostics;
        Ok(result)
    }
}

/// Build the IR of a document for a target configuration.
pub fn build_ir(
    document: &SpecDocument,
    config: &TargetConfig,
) -> Result<LoweredApi, GenerationFailure> {
    lower(&Pipeline::new(), document, config)
}

/// Run generation with default plugins.
pub fn generate(
    document: &SpecDocument,
    target: &Target,
    options: GenerateOptions,
    sink: &mut dyn OutputSink,
) -> Result<GenerationResult, GenerationFailure> {
    Generator::new(target).options(options).generate(document, sink)
}

fn lower(
    pipeline: &Pipeline,
    document: &SpecDocument,
    config: &TargetConfig,
) -> Result<LoweredApi, GenerationFailure> {
    let mut ctx = CompilationContext::new(document, config);
    if let Err(error) = pipeline.run_in(&mut ctx) {
        return Err(GenerationFailure::new(error, ctx.diagnostics));
    }

    match ctx.take_ir() {
        Some(ir) => Ok(LoweredApi {
            ir,
            diagnostics: ctx.diagnostics,
        }),
        None => Err(GenerationFailure::new(
            eyre!("the pipeline produced no IR"),
            ctx.diagnostics,
        )),
    }
}
