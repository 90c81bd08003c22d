//! Language-agnostic type references.

use serde::Serialize;

/// Primitive kinds a schema can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Int32,
    Int64,
    Float,
    Double,
    Bool,
    Date,
    DateTime,
    Uuid,
    Binary,
    /// Fallback for schemas without a precise mapping.
    Any,
}

impl PrimitiveKind {
    /// Get the canonical name of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Uuid => "uuid",
            Self::Binary => "binary",
            Self::Any => "any",
        }
    }
}

/// A reference to a type in the IR.
///
/// `ObjectRef` carries a model name only; the model itself lives in the
/// [`ModelTable`](crate::ModelTable) and is looked up when needed, so
/// self-referential and mutually-referential schemas never nest by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Array(Box<TypeRef>),
    /// String-keyed map.
    Map(Box<TypeRef>),
    ObjectRef(String),
    Optional(Box<TypeRef>),
    Enum { name: String, values: Vec<String> },
}

impl TypeRef {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn any() -> Self {
        Self::Primitive(PrimitiveKind::Any)
    }

    pub fn array(inner: TypeRef) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn map(inner: TypeRef) -> Self {
        Self::Map(Box::new(inner))
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::ObjectRef(name.into())
    }

    /// Wrap in `Optional`, unless already optional.
    pub fn optional(self) -> Self {
        if self.is_optional() {
            self
        } else {
            Self::Optional(Box::new(self))
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strip one `Optional` layer, if present.
    pub fn without_optional(&self) -> &TypeRef {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }

    /// Check whether this is the `Any` fallback.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Any))
    }

    /// Visit this type and every nested type, outermost first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeRef)) {
        f(self);
        match self {
            Self::Array(inner) | Self::Map(inner) | Self::Optional(inner) => inner.walk(f),
            Self::Primitive(_) | Self::ObjectRef(_) | Self::Enum { .. } => {}
        }
    }

    /// Collect the model names referenced by this type.
    pub fn object_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.walk(&mut |ty| {
            if let TypeRef::ObjectRef(name) = ty {
                refs.push(name.as_str());
            }
        });
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_does_not_double_wrap() {
        let ty = TypeRef::string().optional().optional();
        assert_eq!(ty, TypeRef::Optional(Box::new(TypeRef::string())));
        assert_eq!(ty.without_optional(), &TypeRef::string());
    }

    #[test]
    fn test_object_refs() {
        let ty = TypeRef::map(TypeRef::array(TypeRef::object("Pet"))).optional();
        assert_eq!(ty.object_refs(), vec!["Pet"]);
        assert!(TypeRef::string().object_refs().is_empty());
    }

    #[test]
    fn test_primitive_as_str() {
        assert_eq!(PrimitiveKind::DateTime.as_str(), "date-time");
        assert!(TypeRef::any().is_any());
    }

    #[test]
    fn test_serialize_shape() {
        let ty = TypeRef::array(TypeRef::object("Pet")).optional();
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "optional": { "array": { "object_ref": "Pet" } } })
        );
    }
}
