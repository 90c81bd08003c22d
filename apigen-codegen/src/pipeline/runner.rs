//! Pipeline orchestrator.

use apigen_spec::SpecDocument;
use eyre::Result;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{LowerPhase, ReadPhase},
};
use crate::target::TargetConfig;

/// The IR construction pipeline.
///
/// The pipeline manages the execution of phases and plugin hooks. It runs
/// the built-in phases (read, lower) followed by any user phases, calling
/// plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".apigen/debug"))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(&document, &config)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases only.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Add an already boxed plugin.
    pub fn boxed_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Run the pipeline on a document.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run<'a>(
        &self,
        document: &'a SpecDocument,
        config: &'a TargetConfig,
    ) -> Result<CompilationContext<'a>> {
        let mut ctx = CompilationContext::new(document, config);
        self.run_in(&mut ctx)?;
        Ok(ctx)
    }

    /// Run all phases on an existing context.
    ///
    /// Executes, in order:
    /// 1. ReadPhase - checks required sections
    /// 2. LowerPhase - builds the IR
    /// 3. User phases (if any)
    ///
    /// Diagnostics recorded before a fatal error stay in `ctx`.
    pub fn run_in(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let builtin_phases: Vec<Box<dyn Phase>> = vec![Box::new(ReadPhase), Box::new(LowerPhase)];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }

        Ok(())
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let phase_name = phase.name();
        tracing::debug!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        tracing::debug!(
            phase = phase_name,
            diagnostics = ctx.diagnostics.len(),
            "phase complete"
        );
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
