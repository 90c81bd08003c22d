//! Core utilities and types for the apigen code generator.
//!
//! This crate provides fundamental types and utilities used across
//! the apigen crates.

mod file;
mod utils;

// Output sinks
pub use file::{DirectorySink, MemorySink, OutputSink, Overwrite, WriteResult};
// String utilities
pub use utils::{split_words, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
