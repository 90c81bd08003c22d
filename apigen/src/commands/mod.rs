mod check;
mod completions;
mod generate;
mod inspect;

use std::path::{Path, PathBuf};

use apigen_codegen::TargetConfig;
use apigen_spec::SpecDocument;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use inspect::InspectCommand;

use crate::{
    config::{ApigenToml, CONFIG_FILE},
    targets::TargetKind,
};

/// Extension trait for exiting on specification errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for apigen_spec::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "apigen")]
#[command(version)]
#[command(about = "Generate typed API servers from OpenAPI documents")]
pub(crate) struct Cli {
    /// Enable debug logging (overridden by APIGEN_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from an OpenAPI document
    Generate(GenerateCommand),

    /// Validate a document without generating code
    Check(CheckCommand),

    /// Show the normalized routes and models of a document
    Inspect(InspectCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Arguments shared by every command reading a document.
#[derive(Args)]
pub struct SpecArgs {
    /// Path to the OpenAPI document (.json, .yaml or .yml)
    pub spec: PathBuf,

    /// Path to apigen.toml (defaults to ./apigen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target to generate (overrides apigen.toml setting)
    #[arg(short, long, value_enum)]
    pub target: Option<TargetKind>,
}

/// Everything resolved from [`SpecArgs`].
pub struct Loaded {
    pub document: SpecDocument,
    pub file: ApigenToml,
    pub kind: TargetKind,
    pub config: TargetConfig,
}

impl SpecArgs {
    /// Load the configuration file and the document.
    ///
    /// Document errors exit with a rendered diagnostic.
    pub fn load(&self) -> Result<Loaded> {
        let (path, explicit) = match &self.config {
            Some(path) => (path.as_path(), true),
            None => (Path::new(CONFIG_FILE), false),
        };
        let file = ApigenToml::load(path, explicit)?;

        let kind = self.target.or(file.generate.target).unwrap_or_default();
        let config = file.target.apply(kind.config());
        let document = SpecDocument::open(&self.spec).unwrap_or_exit();

        Ok(Loaded {
            document,
            file,
            kind,
            config,
        })
    }
}
