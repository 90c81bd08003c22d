//! Core operations.
//!
//! This module contains the business logic for apigen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod inspect;

pub use check::check;
pub use generate::{GenerateSettings, generate};
pub use inspect::inspect;
