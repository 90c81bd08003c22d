//! IR construction pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the phases
//! from the parsed specification document to the finished IR. The pipeline
//! provides:
//!
//! - Explicit phase boundaries (read → lower)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//!
//! Any phase error is fatal: the IR must be complete before rendering starts.
//!
//! # Example
//!
//! ```ignore
//! use apigen_codegen::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let ctx = pipeline.run(&document, &config)?;
//!
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("warning: {}", diag.message);
//!     }
//! }
//! ```

mod context;
mod diagnostic;
mod error;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::BuildError;
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
