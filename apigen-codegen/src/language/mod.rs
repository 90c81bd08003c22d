//! Language-specific abstractions.
//!
//! This module provides traits and types for language-specific code generation:
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`IdentifierContext`] - The role an identifier plays
//! - [`TypeMapper`] - Trait for mapping IR types to language types

mod naming;
mod traits;

pub use naming::{IdentifierContext, NamingConvention};
pub use traits::TypeMapper;
