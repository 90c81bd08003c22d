//! Named schemas → models.

use std::collections::HashSet;

use apigen_ir::{Discriminator, Field, Model, ModelKind, TypeRef};
use apigen_spec::{ref_name, ref_of};
use serde_json::Value;

use super::{
    Lowerer,
    types::{has_properties, placeholder, string_enum, union_variants},
};
use crate::{language::IdentifierContext, mapper::NameScope};

impl<'a> Lowerer<'a> {
    /// Register every named schema under its identifier, in declaration order.
    pub(super) fn declare_models(&mut self) {
        for (raw, _) in self.reader.schemas() {
            let identifier = self.mapper.type_name(raw);
            self.note(&identifier, &schema_location(raw));
            self.models.insert(placeholder(&identifier.name, raw));
            self.schema_names.insert(raw, identifier.name);
        }
    }

    /// Replace each declared placeholder with its lowered model.
    pub(super) fn lower_models(&mut self) {
        for (raw, schema) in self.reader.schemas() {
            let Some(name) = self.schema_names.get(raw).cloned() else {
                continue;
            };
            let model = self.lower_model(&name, raw, schema, &schema_location(raw));
            self.models.insert(model);
        }
    }

    pub(super) fn lower_model(
        &mut self,
        name: &str,
        raw_name: &str,
        schema: &'a Value,
        location: &str,
    ) -> Model {
        let mut discriminator = None;

        let kind = if let Some(reference) = ref_of(schema) {
            ModelKind::Alias(self.ref_type(reference, name, location))
        } else if let Some(values) = string_enum(schema) {
            ModelKind::Enum(values)
        } else if schema.get("allOf").is_some() || has_properties(schema) {
            ModelKind::Record(self.record_fields(name, schema, location))
        } else if let Some(variants) = union_variants(schema) {
            let (variants, refs) = self.union_members(name, variants, location);
            discriminator = self.discriminator(schema, &refs);
            ModelKind::Union(variants)
        } else if schema.get("type").and_then(Value::as_str) == Some("object")
            && schema.get("additionalProperties").is_none()
        {
            ModelKind::Record(Vec::new())
        } else {
            ModelKind::Alias(self.type_ref(schema, name, location))
        };

        Model {
            name: name.to_string(),
            raw_name: raw_name.to_string(),
            description: description(schema),
            kind,
            discriminator,
        }
    }

    /// Fields of an object schema, with `allOf` parts flattened in order.
    /// The first declaration of a property wins.
    fn record_fields(&mut self, model: &str, schema: &'a Value, location: &str) -> Vec<Field> {
        let mut properties: Vec<(&'a str, &'a Value)> = Vec::new();
        let mut required: HashSet<&'a str> = HashSet::new();
        let mut visited: HashSet<*const Value> = HashSet::new();
        self.collect_properties(schema, &mut properties, &mut required, &mut visited);

        let mut scope = NameScope::new();
        let mut fields = Vec::with_capacity(properties.len());
        for (raw, property) in properties {
            let field_location = format!("{location}.properties.{raw}");
            let identifier = self.mapper.claim_in(&mut scope, raw, IdentifierContext::Field);
            self.note(&identifier, &field_location);

            let is_required = required.contains(raw);
            let ty = self.type_ref(property, &format!("{model} {raw}"), &field_location);
            fields.push(Field {
                name: identifier.name,
                raw_name: raw.to_string(),
                ty: if is_required { ty } else { ty.optional() },
                required: is_required,
                description: description(property),
            });
        }
        fields
    }

    fn collect_properties(
        &self,
        schema: &'a Value,
        properties: &mut Vec<(&'a str, &'a Value)>,
        required: &mut HashSet<&'a str>,
        visited: &mut HashSet<*const Value>,
    ) {
        let Ok(schema) = self.reader.resolve(schema) else {
            return;
        };
        if !visited.insert(schema as *const Value) {
            return;
        }

        if let Some(parts) = schema.get("allOf").and_then(Value::as_array) {
            for part in parts {
                self.collect_properties(part, properties, required, visited);
            }
        }

        if let Some(own) = schema.get("properties").and_then(Value::as_object) {
            for (raw, property) in own {
                if !properties.iter().any(|(existing, _)| *existing == raw.as_str()) {
                    properties.push((raw.as_str(), property));
                }
            }
        }

        if let Some(names) = schema.get("required").and_then(Value::as_array) {
            required.extend(names.iter().filter_map(Value::as_str));
        }
    }

    /// Model names of union alternatives, plus `(raw schema name, model)`
    /// for alternatives that reference a named schema.
    fn union_members(
        &mut self,
        model: &str,
        variants: &'a [Value],
        location: &str,
    ) -> (Vec<String>, Vec<(String, String)>) {
        let mut names = Vec::with_capacity(variants.len());
        let mut refs = Vec::new();

        for (index, variant) in variants.iter().enumerate() {
            if let Some(reference) = ref_of(variant)
                && let Some(target) = self.schema_model(reference)
            {
                refs.push((ref_name(reference).to_string(), target.clone()));
                names.push(target);
                continue;
            }

            let hint = format!("{model} variant {}", index + 1);
            let name = match self.type_ref(variant, &hint, location) {
                TypeRef::ObjectRef(name) => name,
                other => {
                    let identifier = self.mapper.fresh_type_name(&hint);
                    self.note(&identifier, location);
                    self.models.insert(Model {
                        name: identifier.name.clone(),
                        raw_name: hint,
                        description: None,
                        kind: ModelKind::Alias(other),
                        discriminator: None,
                    });
                    identifier.name
                }
            };
            names.push(name);
        }

        (names, refs)
    }

    /// Discriminator of a union: explicit mapping entries, or the referenced
    /// schema names when no mapping is given.
    fn discriminator(&self, schema: &Value, refs: &[(String, String)]) -> Option<Discriminator> {
        let node = schema.get("discriminator")?;
        let property = node.get("propertyName").and_then(Value::as_str)?;

        let mapping = match node.get("mapping").and_then(Value::as_object) {
            Some(entries) => entries
                .iter()
                .filter_map(|(value, target)| {
                    let target = target.as_str()?;
                    let model = self
                        .schema_model(target)
                        .or_else(|| self.schema_names.get(target).cloned())?;
                    Some((value.clone(), model))
                })
                .collect(),
            None => refs.to_vec(),
        };

        Some(Discriminator {
            property: property.to_string(),
            mapping,
        })
    }
}

fn schema_location(raw: &str) -> String {
    format!("components.schemas.{raw}")
}

fn description(schema: &Value) -> Option<String> {
    schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
}
