//! IR construction, rendering and orchestration for the apigen code generator.
//!
//! # Module Organization
//!
//! - [`pipeline`] - IR construction phases (read, lower), diagnostics and plugins
//! - [`mapper`] - Naming and type mapping with collision handling
//! - [`language`] - Language-specific abstractions (NamingConvention, TypeMapper)
//! - [`target`] - Target configuration
//! - [`render`] - Templates and the renderer
//! - [`builder`] - Text building blocks (CodeBuilder, Indent)
//! - [`generate`] - The generation orchestrator
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod generate;
pub mod language;
pub mod mapper;
pub mod pipeline;
pub mod render;
pub mod target;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use generate::{
    GenerateOptions, GenerationFailure, GenerationResult, Generator, LoweredApi, build_ir,
    generate,
};
pub use target::{ParamDelimiter, Target, TargetConfig};
