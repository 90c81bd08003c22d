//! Naming conventions for target languages.

/// The role an identifier plays in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierContext {
    /// A type or model name.
    Type,
    /// A record field.
    Field,
    /// A function or handler (operation identifiers).
    Function,
    /// An operation parameter.
    Parameter,
    /// A constructor of an enum type.
    EnumVariant,
    /// A module or namespace component.
    Module,
}

impl IdentifierContext {
    /// Placeholder word used when a raw name contains no usable characters.
    pub fn placeholder(&self) -> &'static str {
        "unnamed"
    }
}

/// Language-specific naming conventions.
///
/// Defines the casing applied in each [`IdentifierContext`], how names that
/// start with a digit are prefixed, and how reserved words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Casing for type names (e.g., "my-model" -> "MyModel")
    pub type_case: fn(&str) -> String,
    /// Casing for values: fields, functions and parameters (e.g., "user_id" -> "userId")
    pub value_case: fn(&str) -> String,
    /// Casing for enum constructors
    pub variant_case: fn(&str) -> String,
    /// Casing for module components
    pub module_case: fn(&str) -> String,
    /// Prefix for identifiers that would otherwise start with a digit
    pub digit_prefix: fn(IdentifierContext) -> &'static str,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "type_" in Haskell)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Apply the casing rule for a context.
    pub fn case(&self, raw: &str, context: IdentifierContext) -> String {
        let case = match context {
            IdentifierContext::Type => self.type_case,
            IdentifierContext::Field
            | IdentifierContext::Function
            | IdentifierContext::Parameter => self.value_case,
            IdentifierContext::EnumVariant => self.variant_case,
            IdentifierContext::Module => self.module_case,
        };
        case(raw)
    }

    /// Map a raw name to a lexically valid identifier, without escaping
    /// reserved words.
    ///
    /// Illegal characters become word separators, an empty result becomes the
    /// context placeholder and a leading digit gets the convention's prefix.
    pub fn base_identifier(&self, raw: &str, context: IdentifierContext) -> String {
        let mut name = self.case(raw, context);
        if name.is_empty() {
            name = self.case(context.placeholder(), context);
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert_str(0, (self.digit_prefix)(context));
        }
        name
    }

    /// Transform and make safe for use as an identifier in `context`.
    pub fn identifier(&self, raw: &str, context: IdentifierContext) -> String {
        self.safe_name(&self.base_identifier(raw, context))
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, raw: &str) -> String {
        self.identifier(raw, IdentifierContext::Type)
    }

    /// Transform and make safe for use as a field name.
    pub fn field_name(&self, raw: &str) -> String {
        self.identifier(raw, IdentifierContext::Field)
    }

    /// Transform and make safe for use as a function name.
    pub fn function_name(&self, raw: &str) -> String {
        self.identifier(raw, IdentifierContext::Function)
    }
}

#[cfg(test)]
mod tests {
    use apigen_core::{to_camel_case, to_pascal_case};

    use super::*;

    fn digit_prefix(context: IdentifierContext) -> &'static str {
        match context {
            IdentifierContext::Type | IdentifierContext::EnumVariant | IdentifierContext::Module => "N",
            _ => "n",
        }
    }

    fn escape_reserved(name: &str) -> String {
        format!("{name}_")
    }

    const TEST_NAMING: NamingConvention = NamingConvention {
        type_case: to_pascal_case,
        value_case: to_camel_case,
        variant_case: to_pascal_case,
        module_case: to_pascal_case,
        digit_prefix,
        reserved_words: &["type", "data"],
        escape_reserved,
    };

    #[test]
    fn test_casing_per_context() {
        assert_eq!(TEST_NAMING.type_name("my-model"), "MyModel");
        assert_eq!(TEST_NAMING.field_name("created_at"), "createdAt");
        assert_eq!(TEST_NAMING.function_name("Get Users"), "getUsers");
    }

    #[test]
    fn test_reserved_words_escaped() {
        assert_eq!(TEST_NAMING.field_name("type"), "type_");
        assert_eq!(TEST_NAMING.field_name("Data"), "data_");
        assert_eq!(TEST_NAMING.type_name("data"), "Data");
    }

    #[test]
    fn test_leading_digit_and_placeholder() {
        assert_eq!(TEST_NAMING.type_name("200-response"), "N200Response");
        assert_eq!(TEST_NAMING.field_name("1st"), "n1st");
        assert_eq!(TEST_NAMING.type_name("$$$"), "Unnamed");
        assert_eq!(TEST_NAMING.field_name(""), "unnamed");
    }
}
