//! Language-agnostic code generation traits.

use apigen_ir::{PrimitiveKind, TypeRef};

/// Trait for mapping IR types to language-specific type strings.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a primitive kind to a language type
    fn map_primitive(&self, kind: PrimitiveKind) -> &'static str;

    /// Map a full type reference, including containers and model references
    fn map_type(&self, ty: &TypeRef) -> String;
}
