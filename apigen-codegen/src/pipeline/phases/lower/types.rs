//! Schema → TypeRef mapping.

use apigen_ir::{Model, ModelKind, TypeRef};
use apigen_spec::ref_of;
use serde_json::Value;

use super::Lowerer;
use crate::{
    mapper::{SchemaType, primitive_kind, schema_type},
    pipeline::DiagnosticKind,
};

/// Maximum nesting of non-schema `$ref` targets inlined into one type.
const MAX_INLINE_DEPTH: usize = 16;

/// Prefixes under which named schemas live.
const SCHEMA_PREFIXES: [&str; 2] = ["#/components/schemas/", "#/definitions/"];

impl<'a> Lowerer<'a> {
    /// Map a schema to a type reference.
    ///
    /// `hint` names any model hoisted out of the schema; `location` is used
    /// for diagnostics. Never fails: unsupported shapes fall back to `Any`
    /// with a warning.
    pub(super) fn type_ref(&mut self, schema: &'a Value, hint: &str, location: &str) -> TypeRef {
        let SchemaType { name, nullable } = schema_type(schema);
        let ty = self.non_null_type_ref(schema, name, hint, location);
        if nullable { ty.optional() } else { ty }
    }

    fn non_null_type_ref(
        &mut self,
        schema: &'a Value,
        ty: Option<&'a str>,
        hint: &str,
        location: &str,
    ) -> TypeRef {
        if let Some(reference) = ref_of(schema) {
            return self.ref_type(reference, hint, location);
        }

        if let Some(values) = string_enum(schema) {
            let identifier = self.mapper.fresh_type_name(hint);
            self.note(&identifier, location);
            return TypeRef::Enum {
                name: identifier.name,
                values,
            };
        }

        if let Some(parts) = schema.get("allOf").and_then(Value::as_array) {
            if let [single] = parts.as_slice()
                && !has_properties(schema)
            {
                return self.type_ref(single, hint, location);
            }
            return self.hoist(schema, hint, location);
        }

        if is_union(schema) || has_properties(schema) {
            return self.hoist(schema, hint, location);
        }

        match ty {
            Some("array") => match schema.get("items") {
                Some(items) => {
                    let item_hint = format!("{hint} item");
                    TypeRef::array(self.type_ref(items, &item_hint, location))
                }
                None => {
                    self.warn(
                        DiagnosticKind::UnsupportedSchema,
                        "array schema without 'items'; using an array of any",
                        location,
                    );
                    TypeRef::array(TypeRef::any())
                }
            },
            Some("object") | None => match schema.get("additionalProperties") {
                Some(Value::Bool(true)) => TypeRef::map(TypeRef::any()),
                Some(value @ Value::Object(_)) => {
                    let value_hint = format!("{hint} value");
                    TypeRef::map(self.type_ref(value, &value_hint, location))
                }
                _ => TypeRef::any(),
            },
            Some(other) => {
                let format = schema.get("format").and_then(Value::as_str);
                match primitive_kind(other, format) {
                    Some(kind) => TypeRef::Primitive(kind),
                    None => {
                        self.warn(
                            DiagnosticKind::UnsupportedSchema,
                            format!("unsupported schema type '{other}'; using any"),
                            location,
                        );
                        TypeRef::any()
                    }
                }
            }
        }
    }

    /// Map a `$ref`: named schemas become model references, other local
    /// targets are inlined, dangling references fall back to `Any`.
    pub(super) fn ref_type(&mut self, reference: &str, hint: &str, location: &str) -> TypeRef {
        if let Some(model) = self.schema_model(reference) {
            return TypeRef::object(model);
        }

        let Some(target) = self.reader.resolve_ref(reference) else {
            self.warn(
                DiagnosticKind::UnsupportedSchema,
                format!("unresolved reference '{reference}'; using any"),
                location,
            );
            return TypeRef::any();
        };

        if self.inline_depth >= MAX_INLINE_DEPTH {
            self.warn(
                DiagnosticKind::UnsupportedSchema,
                format!("reference '{reference}' nests too deeply; using any"),
                location,
            );
            return TypeRef::any();
        }

        self.inline_depth += 1;
        let ty = self.type_ref(target, hint, location);
        self.inline_depth -= 1;
        ty
    }

    /// Model identifier for a reference to a named schema.
    pub(super) fn schema_model(&self, reference: &str) -> Option<String> {
        SCHEMA_PREFIXES
            .iter()
            .find_map(|prefix| reference.strip_prefix(prefix))
            .map(|name| name.replace("~1", "/").replace("~0", "~"))
            .and_then(|name| self.schema_names.get(name.as_str()).cloned())
    }

    /// Hoist an inline schema into a freshly named model.
    pub(super) fn hoist(&mut self, schema: &'a Value, hint: &str, location: &str) -> TypeRef {
        let identifier = self.mapper.fresh_type_name(hint);
        self.note(&identifier, location);
        let name = identifier.name;

        // Registered before lowering so self references resolve.
        self.models.insert(placeholder(&name, hint));
        let model = self.lower_model(&name, hint, schema, location);
        self.models.insert(model);

        TypeRef::object(name)
    }
}

/// A model standing in for a schema that is not lowered yet.
pub(super) fn placeholder(name: &str, raw_name: &str) -> Model {
    Model {
        name: name.to_string(),
        raw_name: raw_name.to_string(),
        description: None,
        kind: ModelKind::Alias(TypeRef::any()),
        discriminator: None,
    }
}

/// Values of a string enum schema.
pub(super) fn string_enum(schema: &Value) -> Option<Vec<String>> {
    let values = schema.get("enum")?.as_array()?;
    let strings: Vec<String> = values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    (!strings.is_empty() && strings.len() == values.iter().filter(|v| !v.is_null()).count())
        .then_some(strings)
}

pub(super) fn has_properties(schema: &Value) -> bool {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .is_some_and(|properties| !properties.is_empty())
}

pub(super) fn is_union(schema: &Value) -> bool {
    union_variants(schema).is_some()
}

/// The `oneOf` or `anyOf` alternatives of a schema.
pub(super) fn union_variants(schema: &Value) -> Option<&Vec<Value>> {
    schema
        .get("oneOf")
        .or_else(|| schema.get("anyOf"))
        .and_then(Value::as_array)
        .filter(|variants| !variants.is_empty())
}
