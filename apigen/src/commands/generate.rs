use std::path::PathBuf;

use apigen_codegen::GenerateOptions;
use clap::Args;
use eyre::Result;

use super::{Loaded, SpecArgs};
use crate::{
    ops::{self, GenerateSettings},
    reports::{Report, TerminalOutput},
};

/// Default output directory.
const DEFAULT_OUTPUT: &str = "generated";

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Output directory (defaults to ./generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write nothing if any file fails to render
    #[arg(long)]
    pub strict: bool,

    /// Skip supporting files (package manifests, build scaffolding)
    #[arg(long)]
    pub no_supporting_files: bool,

    /// Render files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of the pipeline state after each phase
    #[arg(long, value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let Loaded {
            document,
            file,
            kind,
            config,
        } = self.spec.load()?;

        let section = &file.generate;
        let defaults = GenerateOptions::default();
        let options = GenerateOptions {
            strict: self.strict || section.strict.unwrap_or(defaults.strict),
            supporting_files: !self.no_supporting_files
                && section.supporting_files.unwrap_or(defaults.supporting_files),
            parallel: self.parallel || section.parallel.unwrap_or(defaults.parallel),
        };
        let settings = GenerateSettings {
            output_dir: self
                .output
                .clone()
                .or_else(|| section.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            options,
            dry_run: self.dry_run,
            snapshot_dir: self.snapshot_dir.clone(),
        };

        let target = kind.target(config);
        let report = ops::generate(&document, &target, &settings);
        report.render(&mut TerminalOutput::new());

        if !report.succeeded() {
            std::process::exit(1);
        }
        Ok(())
    }
}
