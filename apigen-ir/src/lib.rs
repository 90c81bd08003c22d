//! Intermediate representation types for the apigen code generator.
//!
//! This crate provides the language-agnostic model the generation pipeline
//! is built around: operations with normalized path templates, parameters,
//! responses, and a name-keyed table of models.
//!
//! # Architecture
//!
//! ```text
//! parsed spec → apigen-spec (reader) → apigen-ir (operations, models) → codegen
//! ```
//!
//! The IR types are designed to be:
//! - Language-agnostic (no Haskell/TypeScript-specific concerns)
//! - Immutable once built (renderers get read-only access)
//! - Cycle tolerant (models reference each other by name, never by value)

mod api;
mod http;
mod model;
mod operation;
mod path;
mod types;

pub use api::{ApiIR, ApiMeta, DEFAULT_TAG, InlineEnum, TagGroup};
pub use http::{HttpMethod, ParamLocation};
pub use model::{Discriminator, Field, Model, ModelKind, ModelTable};
pub use operation::{
    DefaultValue, Operation, Parameter, RequestBody, Response, ResponseHeader, ResponseStatus,
};
pub use path::{PATH_DELIMITER, PathSegment, PathTemplate};
pub use types::{PrimitiveKind, TypeRef};
