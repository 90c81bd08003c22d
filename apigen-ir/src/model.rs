//! Named schemas and the model table.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use serde::Serialize;

use crate::TypeRef;

/// A named schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Target-safe type identifier (unique across the run).
    pub name: String,
    /// Name as declared in the specification.
    pub raw_name: String,
    /// Description for documentation comments.
    pub description: Option<String>,
    /// Shape of the model.
    pub kind: ModelKind,
    /// Discriminator for polymorphic variants.
    pub discriminator: Option<Discriminator>,
}

/// Shape of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// An object with ordered fields.
    Record(Vec<Field>),
    /// A closed set of string values.
    Enum(Vec<String>),
    /// One of several other models, by name.
    Union(Vec<String>),
    /// A named wrapper around another type (arrays, maps, primitives).
    Alias(TypeRef),
}

/// A field of a record model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Target-safe field identifier (unique within the model).
    pub name: String,
    /// Property name on the wire.
    pub raw_name: String,
    pub ty: TypeRef,
    pub required: bool,
    pub description: Option<String>,
}

/// Discriminator information for a union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discriminator {
    /// Property carrying the variant tag.
    pub property: String,
    /// Tag value → model name, in declaration order.
    pub mapping: Vec<(String, String)>,
}

impl Model {
    /// Fields of a record model; empty for other kinds.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            ModelKind::Record(fields) => fields,
            _ => &[],
        }
    }

    /// Model names this model refers to, in declaration order (may repeat).
    pub fn references(&self) -> Vec<&str> {
        match &self.kind {
            ModelKind::Record(fields) => fields.iter().flat_map(|f| f.ty.object_refs()).collect(),
            ModelKind::Union(variants) => variants.iter().map(String::as_str).collect(),
            ModelKind::Alias(ty) => ty.object_refs(),
            ModelKind::Enum(_) => Vec::new(),
        }
    }

    /// Every type used by this model, for walking nested types.
    pub fn types(&self) -> Vec<&TypeRef> {
        match &self.kind {
            ModelKind::Record(fields) => fields.iter().map(|f| &f.ty).collect(),
            ModelKind::Alias(ty) => vec![ty],
            ModelKind::Enum(_) | ModelKind::Union(_) => Vec::new(),
        }
    }
}

/// Models indexed by identifier, in declaration order.
///
/// Models point at each other through [`TypeRef::ObjectRef`] names, so the
/// table is the only owner; traversal always goes through it by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelTable {
    models: IndexMap<String, Model>,
}

impl ModelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model, replacing any model with the same name in place.
    pub fn insert(&mut self, model: Model) {
        self.models.insert(model.name.clone(), model);
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.models.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Iterate over models in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Names of all models reachable from `start` (excluding `start` unless
    /// it is part of a cycle), in breadth-first order. Unknown names are
    /// skipped. Terminates on cyclic graphs.
    pub fn reachable_from(&self, start: &str) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        if let Some(model) = self.get(start) {
            queue.extend(model.references());
        }

        while let Some(name) = queue.pop_front() {
            let Some((key, model)) = self.models.get_key_value(name) else {
                continue;
            };
            if !seen.insert(key.as_str()) {
                continue;
            }
            order.push(key.as_str());
            queue.extend(model.references());
        }

        order
    }

    /// Whether the model can reach itself through references.
    pub fn is_recursive(&self, name: &str) -> bool {
        self.reachable_from(name).contains(&name)
    }

    /// References that point at no model in the table: `(from, missing)`.
    pub fn dangling_references(&self) -> Vec<(&str, &str)> {
        self.iter()
            .flat_map(|m| {
                m.references()
                    .into_iter()
                    .filter(move |r| !self.contains(r))
                    .map(move |r| (m.name.as_str(), r))
            })
            .collect()
    }
}
