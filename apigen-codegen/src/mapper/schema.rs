//! Primitive schema classification.

use apigen_ir::PrimitiveKind;
use serde_json::Value;

/// The declared `type` of a schema and whether it admits `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaType<'a> {
    pub name: Option<&'a str>,
    pub nullable: bool,
}

/// Read the `type` of a schema.
///
/// Handles both `nullable: true` and the type-array form
/// (`type: [string, "null"]`), where the first non-null entry wins.
pub fn schema_type(schema: &Value) -> SchemaType<'_> {
    let mut nullable = schema
        .get("nullable")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let name = match schema.get("type") {
        Some(Value::String(name)) => Some(name.as_str()),
        Some(Value::Array(names)) => {
            let mut first = None;
            for name in names.iter().filter_map(Value::as_str) {
                if name == "null" {
                    nullable = true;
                } else if first.is_none() {
                    first = Some(name);
                }
            }
            first
        }
        _ => None,
    };

    SchemaType { name, nullable }
}

/// Map a primitive `type`/`format` pair to a primitive kind.
///
/// Unknown formats fall back to the base kind of the type; unknown types
/// yield `None`.
pub fn primitive_kind(ty: &str, format: Option<&str>) -> Option<PrimitiveKind> {
    let kind = match (ty, format) {
        ("string", Some("date")) => PrimitiveKind::Date,
        ("string", Some("date-time")) => PrimitiveKind::DateTime,
        ("string", Some("uuid")) => PrimitiveKind::Uuid,
        ("string", Some("binary" | "byte")) => PrimitiveKind::Binary,
        ("string", _) => PrimitiveKind::String,
        ("integer", Some("int64")) => PrimitiveKind::Int64,
        ("integer", _) => PrimitiveKind::Int32,
        ("number", Some("float")) => PrimitiveKind::Float,
        ("number", _) => PrimitiveKind::Double,
        ("boolean", _) => PrimitiveKind::Bool,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_primitive_kind() {
        assert_eq!(primitive_kind("string", None), Some(PrimitiveKind::String));
        assert_eq!(primitive_kind("string", Some("date-time")), Some(PrimitiveKind::DateTime));
        assert_eq!(primitive_kind("string", Some("email")), Some(PrimitiveKind::String));
        assert_eq!(primitive_kind("integer", Some("int64")), Some(PrimitiveKind::Int64));
        assert_eq!(primitive_kind("number", None), Some(PrimitiveKind::Double));
        assert_eq!(primitive_kind("file", None), None);
    }

    #[test]
    fn test_schema_type_nullable_forms() {
        assert_eq!(
            schema_type(&json!({ "type": "string", "nullable": true })),
            SchemaType { name: Some("string"), nullable: true }
        );
        assert_eq!(
            schema_type(&json!({ "type": ["null", "integer"] })),
            SchemaType { name: Some("integer"), nullable: true }
        );
        assert_eq!(
            schema_type(&json!({ "properties": {} })),
            SchemaType { name: None, nullable: false }
        );
    }
}
