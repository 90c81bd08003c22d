//! Haskell type mapper implementation.

use std::collections::{BTreeMap, BTreeSet};

use apigen_codegen::language::TypeMapper;
use apigen_ir::{PrimitiveKind, TypeRef};

/// Maps IR types to Haskell type syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaskellTypeMapper;

impl HaskellTypeMapper {
    /// Map a type for use as a type argument, parenthesized when it is an
    /// application (`Maybe Text` -> `(Maybe Text)`).
    pub fn map_atom(&self, ty: &TypeRef) -> String {
        let mapped = self.map_type(ty);
        if needs_parens(&mapped) {
            format!("({mapped})")
        } else {
            mapped
        }
    }

    /// Record the imports `ty` needs.
    pub fn collect_imports(&self, ty: &TypeRef, imports: &mut Imports) {
        ty.walk(&mut |inner| match inner {
            TypeRef::Primitive(kind) => imports.add_primitive(*kind),
            TypeRef::Map(_) => {
                imports.add("Data.Map.Strict", "Map");
                imports.add("Data.Text", "Text");
            }
            _ => {}
        });
    }
}

impl TypeMapper for HaskellTypeMapper {
    fn language(&self) -> &'static str {
        "haskell"
    }

    fn map_primitive(&self, kind: PrimitiveKind) -> &'static str {
        match kind {
            PrimitiveKind::String | PrimitiveKind::Binary => "Text",
            PrimitiveKind::Int32 => "Int",
            PrimitiveKind::Int64 => "Integer",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Date => "Day",
            PrimitiveKind::DateTime => "UTCTime",
            PrimitiveKind::Uuid => "UUID",
            PrimitiveKind::Any => "Value",
        }
    }

    fn map_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(kind) => self.map_primitive(*kind).to_string(),
            TypeRef::Array(inner) => format!("[{}]", self.map_type(inner)),
            TypeRef::Map(inner) => format!("Map Text {}", self.map_atom(inner)),
            TypeRef::Optional(inner) => format!("Maybe {}", self.map_atom(inner)),
            TypeRef::ObjectRef(name) | TypeRef::Enum { name, .. } => name.clone(),
        }
    }
}

/// A type needs parentheses as an argument when it contains a space outside
/// list brackets.
fn needs_parens(mapped: &str) -> bool {
    let mut depth = 0usize;
    for c in mapped.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Import lines of a generated module, grouped by module and sorted.
#[derive(Debug, Clone, Default)]
pub struct Imports {
    modules: BTreeMap<&'static str, BTreeSet<&'static str>>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: &'static str, name: &'static str) {
        self.modules.entry(module).or_default().insert(name);
    }

    fn add_primitive(&mut self, kind: PrimitiveKind) {
        match kind {
            PrimitiveKind::String | PrimitiveKind::Binary => self.add("Data.Text", "Text"),
            PrimitiveKind::Date => self.add("Data.Time", "Day"),
            PrimitiveKind::DateTime => self.add("Data.Time", "UTCTime"),
            PrimitiveKind::Uuid => self.add("Data.UUID", "UUID"),
            PrimitiveKind::Any => self.add("Data.Aeson", "Value"),
            PrimitiveKind::Int32
            | PrimitiveKind::Int64
            | PrimitiveKind::Float
            | PrimitiveKind::Double
            | PrimitiveKind::Bool => {}
        }
    }

    /// `import M (a, b)` lines in module order.
    pub fn lines(&self) -> Vec<String> {
        self.modules
            .iter()
            .map(|(module, names)| {
                let names: Vec<&str> = names.iter().copied().collect();
                format!("import {module} ({})", names.join(", "))
            })
            .collect()
    }
}
