//! Haskell naming conventions.

use apigen_codegen::language::{IdentifierContext, NamingConvention};
use apigen_core::{to_camel_case, to_pascal_case};

/// Haskell 2010 keywords plus the keywords of common GHC extensions.
pub const HASKELL_KEYWORDS: &[&str] = &[
    "as",
    "case",
    "class",
    "data",
    "default",
    "deriving",
    "do",
    "else",
    "family",
    "forall",
    "foreign",
    "hiding",
    "if",
    "import",
    "in",
    "infix",
    "infixl",
    "infixr",
    "instance",
    "let",
    "mdo",
    "module",
    "newtype",
    "of",
    "pattern",
    "proc",
    "qualified",
    "rec",
    "then",
    "type",
    "where",
];

/// Names the generated modules define or import unqualified.
pub const GENERATED_NAMES: &[&str] = &[
    "api",
    "emptyServer",
    "serverFromBackend",
    "API",
    "Bool",
    "Day",
    "Double",
    "Float",
    "Generic",
    "Handler",
    "Int",
    "Integer",
    "Map",
    "Maybe",
    "NoContent",
    "Proxy",
    "Server",
    "String",
    "Text",
    "UTCTime",
    "UUID",
    "Value",
];

fn haskell_digit_prefix(context: IdentifierContext) -> &'static str {
    match context {
        IdentifierContext::Type | IdentifierContext::EnumVariant | IdentifierContext::Module => "N",
        IdentifierContext::Field | IdentifierContext::Function | IdentifierContext::Parameter => {
            "n"
        }
    }
}

fn escape_haskell_reserved(name: &str) -> String {
    format!("{name}_")
}

/// Haskell naming conventions.
pub const HASKELL_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    value_case: to_camel_case,
    variant_case: to_pascal_case,
    module_case: to_pascal_case,
    digit_prefix: haskell_digit_prefix,
    reserved_words: HASKELL_KEYWORDS,
    escape_reserved: escape_haskell_reserved,
};

/// Lower the first character (`PetStore` -> `petStore`).
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
