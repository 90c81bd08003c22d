//! Test utilities for targets and pipeline tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use apigen_core::{to_camel_case, to_pascal_case};
use apigen_spec::SpecDocument;
use serde_json::{Value, json};

use crate::{
    language::{IdentifierContext, NamingConvention},
    target::TargetConfig,
};

fn digit_prefix(context: IdentifierContext) -> &'static str {
    match context {
        IdentifierContext::Type | IdentifierContext::EnumVariant | IdentifierContext::Module => "N",
        _ => "n",
    }
}

fn escape_reserved(name: &str) -> String {
    format!("{name}_")
}

/// A Haskell-like naming convention: PascalCase types, camelCase values,
/// `_` appended to reserved words.
pub const TEST_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    value_case: to_camel_case,
    variant_case: to_pascal_case,
    module_case: to_pascal_case,
    digit_prefix,
    reserved_words: &["type", "data", "class", "module"],
    escape_reserved,
};

/// Target configuration used across the crate's tests.
pub fn test_config() -> TargetConfig {
    TargetConfig::new("test", TEST_NAMING)
}

/// Wrap a JSON tree as a document.
pub fn document(value: Value) -> SpecDocument {
    SpecDocument::from_value(value)
}

/// A document with the required sections and nothing else.
pub fn minimal_document() -> SpecDocument {
    document(json!({
        "openapi": "3.0.3",
        "info": { "title": "Test API", "version": "1.0.0" },
        "paths": {}
    }))
}
