//! Naming and type mapping.
//!
//! The [`Mapper`] turns raw specification names into target-safe identifiers.
//! It is deterministic and injective per scope: types and functions share
//! run-wide scopes, while fields and parameters are claimed in scopes the
//! caller creates per model or operation.

mod schema;
mod scope;

pub use schema::{SchemaType, primitive_kind, schema_type};
pub use scope::{Collision, Identifier, NameScope};

use crate::{
    language::{IdentifierContext, NamingConvention},
    target::TargetConfig,
};

/// Maps raw names to identifiers for one generation run.
#[derive(Debug)]
pub struct Mapper<'a> {
    naming: &'a NamingConvention,
    reserved: &'a [String],
    types: NameScope,
    functions: NameScope,
}

impl<'a> Mapper<'a> {
    pub fn new(config: &'a TargetConfig) -> Self {
        Self {
            naming: &config.naming,
            reserved: &config.reserved_words,
            types: NameScope::new(),
            functions: NameScope::new(),
        }
    }

    /// Whether a name is reserved by the language or the configuration.
    pub fn is_reserved(&self, name: &str) -> bool {
        reserved(self.naming, self.reserved, name)
    }

    /// Map a raw name to a safe identifier without claiming it.
    pub fn to_identifier(&self, raw: &str, context: IdentifierContext) -> String {
        let base = self.naming.base_identifier(raw, context);
        if self.is_reserved(&base) {
            (self.naming.escape_reserved)(&base)
        } else {
            base
        }
    }

    /// Claim a run-wide type name. The same raw name always maps to the same
    /// identifier.
    pub fn type_name(&mut self, raw: &str) -> Identifier {
        let preferred = self.to_identifier(raw, IdentifierContext::Type);
        let (naming, words) = (self.naming, self.reserved);
        self.types
            .claim(raw, preferred, |name| reserved(naming, words, name))
    }

    /// Claim a new run-wide type name for a synthesized type (hoisted
    /// schemas, inline enums), even if the raw name was seen before.
    pub fn fresh_type_name(&mut self, raw: &str) -> Identifier {
        let preferred = self.to_identifier(raw, IdentifierContext::Type);
        let (naming, words) = (self.naming, self.reserved);
        self.types
            .claim_fresh(raw, preferred, |name| reserved(naming, words, name))
    }

    /// Look up a type name already claimed for a raw name.
    pub fn existing_type(&self, raw: &str) -> Option<&str> {
        self.types.get(raw)
    }

    /// Claim a run-wide function name. Every call yields a distinct identifier.
    pub fn function_name(&mut self, raw: &str) -> Identifier {
        let preferred = self.to_identifier(raw, IdentifierContext::Function);
        let (naming, words) = (self.naming, self.reserved);
        self.functions
            .claim_fresh(raw, preferred, |name| reserved(naming, words, name))
    }

    /// Claim an identifier in a caller-owned scope.
    pub fn claim_in(
        &self,
        scope: &mut NameScope,
        raw: &str,
        context: IdentifierContext,
    ) -> Identifier {
        let preferred = self.to_identifier(raw, context);
        scope.claim(raw, preferred, |name| self.is_reserved(name))
    }

    /// Claim a new identifier in a caller-owned scope, even for a repeated raw name.
    pub fn fresh_in(
        &self,
        scope: &mut NameScope,
        raw: &str,
        context: IdentifierContext,
    ) -> Identifier {
        let preferred = self.to_identifier(raw, context);
        scope.claim_fresh(raw, preferred, |name| self.is_reserved(name))
    }
}

fn reserved(naming: &NamingConvention, extra: &[String], name: &str) -> bool {
    naming.is_reserved(name) || extra.iter().any(|word| word == name)
}
