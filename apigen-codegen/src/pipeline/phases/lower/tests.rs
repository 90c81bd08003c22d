use apigen_ir::{
    ApiIR, DefaultValue, HttpMethod, ModelKind, ParamLocation, PathSegment, PrimitiveKind,
    ResponseStatus, TypeRef,
};
use serde_json::{Value, json};

use super::*;
use crate::{
    pipeline::{Severity, phases::ReadPhase},
    testing::{document, test_config},
};

fn spec(paths: Value, schemas: Value) -> Value {
    json!({
        "openapi": "3.0.3",
        "info": { "title": "Pets", "version": "1.0.0" },
        "paths": paths,
        "components": { "schemas": schemas }
    })
}

fn lower(value: Value) -> (Result<ApiIR>, Vec<Diagnostic>) {
    let document = document(value);
    let config = test_config();
    let mut ctx = CompilationContext::new(&document, &config);
    ReadPhase.run(&mut ctx).unwrap();
    let result = LowerPhase.run(&mut ctx);
    let ir = result.map(|()| ctx.ir.take().unwrap());
    (ir, ctx.diagnostics)
}

fn lower_ok(value: Value) -> (ApiIR, Vec<Diagnostic>) {
    let (ir, diagnostics) = lower(value);
    (ir.unwrap(), diagnostics)
}

fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn test_root_path_is_root_marker() {
    let (ir, _) = lower_ok(spec(
        json!({ "/": { "get": { "responses": { "200": { "description": "ok" } } } } }),
        json!({}),
    ));

    let op = &ir.operations[0];
    assert!(op.path.is_root());
    assert_eq!(op.path.segments(), &[PathSegment::Root]);
    assert_eq!(op.id, "getRoot");
    assert_eq!(op.raw_id, "get root");
}

#[test]
fn test_users_id_posts_segments() {
    let (ir, _) = lower_ok(spec(
        json!({
            "/users/{id}/posts": {
                "get": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                    ],
                    "responses": { "200": { "description": "ok" } }
                }
            }
        }),
        json!({}),
    ));

    let op = &ir.operations[0];
    assert_eq!(
        op.path.segments(),
        &[
            PathSegment::literal("users"),
            PathSegment::parameter("id", TypeRef::string()),
            PathSegment::literal("posts"),
        ]
    );
    assert_eq!(op.path_parameter("id").map(|p| p.required), Some(true));
    assert_eq!(op.id, "getUsersIdPosts");
    assert_eq!(op.path.to_route(), "/users/{id}/posts");
}

#[test]
fn test_unbound_placeholder_is_fatal() {
    let (result, diagnostics) = lower(spec(
        json!({ "/users/{id}": { "get": { "responses": {} } } }),
        json!({}),
    ));

    let report = result.unwrap_err();
    assert_eq!(
        report.downcast_ref::<BuildError>(),
        Some(&BuildError::UnboundPathParameter {
            method: "GET".into(),
            path: "/users/{id}".into(),
            name: "id".into(),
        })
    );
    assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::UnboundPathParameter]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_query_parameter_not_bound_to_placeholder() {
    let (result, _) = lower(spec(
        json!({
            "/users/{id}": {
                "get": {
                    "parameters": [{ "name": "id", "in": "query", "schema": { "type": "string" } }],
                    "responses": {}
                }
            }
        }),
        json!({}),
    ));
    assert!(result.is_err());
}

#[test]
fn test_path_level_parameters_bind() {
    let (ir, _) = lower_ok(spec(
        json!({
            "/pets/{petId}": {
                "parameters": [
                    { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                ],
                "get": { "operationId": "showPet", "responses": {} },
                "delete": { "operationId": "deletePet", "responses": {} }
            }
        }),
        json!({}),
    ));

    assert_eq!(ir.operations.len(), 2);
    for op in &ir.operations {
        assert_eq!(
            op.path.segments()[1],
            PathSegment::parameter("petId", TypeRef::Primitive(PrimitiveKind::Int64))
        );
    }
    assert_eq!(ir.operations[1].method, HttpMethod::Delete);
}

#[test]
fn test_mixed_component_warns_and_stays_literal() {
    let (ir, diagnostics) = lower_ok(spec(
        json!({
            "/files/{name}.json": {
                "get": {
                    "parameters": [{ "name": "name", "in": "path", "schema": { "type": "string" } }],
                    "responses": {}
                }
            }
        }),
        json!({}),
    ));

    assert_eq!(
        ir.operations[0].path.segments(),
        &[PathSegment::literal("files/{name}.json")]
    );
    assert!(kinds(&diagnostics).contains(&DiagnosticKind::UnsupportedPathSegment));
}

#[test]
fn test_model_name_collision_is_reported() {
    let (ir, diagnostics) = lower_ok(spec(
        json!({}),
        json!({
            "My-Model": { "type": "object", "properties": { "a": { "type": "string" } } },
            "My_Model": { "type": "object", "properties": { "b": { "type": "string" } } }
        }),
    ));

    let names: Vec<_> = ir.models.names().collect();
    assert_eq!(names, vec!["MyModel", "MyModel2"]);
    let notice = diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::IdentifierCollision)
        .unwrap();
    assert_eq!(notice.severity, Severity::Info);
    assert_eq!(notice.location.as_deref(), Some("components.schemas.My_Model"));
}

#[test]
fn test_cyclic_models() {
    let (ir, diagnostics) = lower_ok(spec(
        json!({}),
        json!({
            "Node": {
                "type": "object",
                "required": ["value"],
                "properties": {
                    "value": { "type": "integer" },
                    "next": { "$ref": "#/components/schemas/Node" },
                    "owner": { "$ref": "#/components/schemas/Tree" }
                }
            },
            "Tree": {
                "type": "object",
                "properties": { "root": { "$ref": "#/components/schemas/Node" } }
            }
        }),
    ));

    assert!(diagnostics.is_empty());
    let node = ir.models.get("Node").unwrap();
    assert_eq!(node.fields()[0].ty, TypeRef::Primitive(PrimitiveKind::Int32));
    assert!(node.fields()[0].required);
    assert_eq!(node.fields()[1].ty, TypeRef::object("Node").optional());
    assert!(ir.models.is_recursive("Node"));
    assert!(ir.models.is_recursive("Tree"));
    assert!(ir.models.dangling_references().is_empty());
}

#[test]
fn test_models_keep_declaration_order() {
    let (ir, _) = lower_ok(spec(
        json!({}),
        json!({
            "Zebra": { "type": "string" },
            "Apple": { "type": "array", "items": { "$ref": "#/components/schemas/Zebra" } }
        }),
    ));

    let names: Vec<_> = ir.models.names().collect();
    assert_eq!(names, vec!["Zebra", "Apple"]);
    assert_eq!(
        ir.models.get("Apple").unwrap().kind,
        ModelKind::Alias(TypeRef::array(TypeRef::object("Zebra")))
    );
}

#[test]
fn test_inline_object_is_hoisted() {
    let (ir, _) = lower_ok(spec(
        json!({
            "/pets": {
                "post": {
                    "operationId": "createPet",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "type": "object", "properties": { "name": { "type": "string" } } }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "created",
                            "content": {
                                "application/json": {
                                    "schema": { "type": "object", "properties": { "id": { "type": "integer" } } }
                                }
                            }
                        }
                    }
                }
            }
        }),
        json!({
            "Pet": {
                "type": "object",
                "properties": {
                    "owner": { "type": "object", "properties": { "name": { "type": "string" } } }
                }
            }
        }),
    ));

    let op = ir.operation("createPet").unwrap();
    let body = op.request_body.as_ref().unwrap();
    assert_eq!(body.ty, TypeRef::object("CreatePetRequest"));
    assert!(body.required);
    assert_eq!(body.content_type, "application/json");
    assert_eq!(
        op.responses[0].ty,
        Some(TypeRef::object("CreatePetResponse201"))
    );
    assert_eq!(
        ir.models.get("Pet").unwrap().fields()[0].ty,
        TypeRef::object("PetOwner").optional()
    );
    let names: Vec<_> = ir.models.names().collect();
    assert_eq!(
        names,
        vec!["Pet", "PetOwner", "CreatePetRequest", "CreatePetResponse201"]
    );
}

#[test]
fn test_all_of_flattens_fields() {
    let (ir, _) = lower_ok(spec(
        json!({}),
        json!({
            "Base": {
                "type": "object",
                "required": ["id"],
                "properties": { "id": { "type": "string" }, "name": { "type": "string" } }
            },
            "Dog": {
                "allOf": [
                    { "$ref": "#/components/schemas/Base" },
                    { "type": "object", "properties": { "name": { "type": "integer" }, "bark": { "type": "boolean" } } }
                ]
            }
        }),
    ));

    let dog = ir.models.get("Dog").unwrap();
    let fields: Vec<_> = dog.fields().iter().map(|f| (f.raw_name.as_str(), f.required)).collect();
    assert_eq!(fields, vec![("id", true), ("name", false), ("bark", false)]);
    assert_eq!(dog.fields()[1].ty, TypeRef::string().optional());
}

#[test]
fn test_union_with_discriminator() {
    let (ir, _) = lower_ok(spec(
        json!({}),
        json!({
            "Cat": { "type": "object", "properties": { "kind": { "type": "string" } } },
            "Dog": { "type": "object", "properties": { "kind": { "type": "string" } } },
            "Pet": {
                "oneOf": [
                    { "$ref": "#/components/schemas/Cat" },
                    { "$ref": "#/components/schemas/Dog" },
                    { "type": "string" }
                ],
                "discriminator": { "propertyName": "kind" }
            }
        }),
    ));

    let pet = ir.models.get("Pet").unwrap();
    assert_eq!(
        pet.kind,
        ModelKind::Union(vec!["Cat".into(), "Dog".into(), "PetVariant3".into()])
    );
    let discriminator = pet.discriminator.as_ref().unwrap();
    assert_eq!(discriminator.property, "kind");
    assert_eq!(
        discriminator.mapping,
        vec![("Cat".into(), "Cat".into()), ("Dog".into(), "Dog".into())]
    );
    assert_eq!(
        ir.models.get("PetVariant3").unwrap().kind,
        ModelKind::Alias(TypeRef::string())
    );
}

#[test]
fn test_unsupported_and_dangling_schemas_fall_back_to_any() {
    let (ir, diagnostics) = lower_ok(spec(
        json!({}),
        json!({
            "Thing": {
                "type": "object",
                "required": ["odd", "gone"],
                "properties": {
                    "odd": { "type": "file" },
                    "gone": { "$ref": "#/components/schemas/Missing" },
                    "free": {}
                }
            }
        }),
    ));

    let thing = ir.models.get("Thing").unwrap();
    assert!(thing.fields().iter().all(|f| f.ty.without_optional().is_any()));
    assert_eq!(
        kinds(&diagnostics),
        vec![DiagnosticKind::UnsupportedSchema, DiagnosticKind::UnsupportedSchema]
    );
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    assert_eq!(
        diagnostics[0].location.as_deref(),
        Some("components.schemas.Thing.properties.odd")
    );
}

#[test]
fn test_inline_enum_and_map() {
    let (ir, _) = lower_ok(spec(
        json!({
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "parameters": [
                        { "name": "status", "in": "query", "schema": { "type": "string", "enum": ["available", "sold"] } },
                        { "name": "limit", "in": "query", "required": true, "schema": { "type": "integer", "default": 20 } }
                    ],
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json": {
                                    "schema": { "type": "object", "additionalProperties": { "type": "integer" } }
                                }
                            }
                        }
                    }
                }
            }
        }),
        json!({}),
    ));

    let op = &ir.operations[0];
    assert_eq!(
        op.parameters[0].ty,
        TypeRef::Enum {
            name: "ListPetsStatus".into(),
            values: vec!["available".into(), "sold".into()],
        }
        .optional()
    );
    assert_eq!(op.parameters[1].default, Some(DefaultValue::Int(20)));
    assert_eq!(op.parameters[1].location, ParamLocation::Query);
    assert_eq!(
        op.responses[0].ty,
        Some(TypeRef::map(TypeRef::Primitive(PrimitiveKind::Int32)))
    );
    assert_eq!(ir.inline_enums()[0].name, "ListPetsStatus");
}

#[test]
fn test_operation_id_collisions_and_reserved_words() {
    let (ir, diagnostics) = lower_ok(spec(
        json!({
            "/a": { "get": { "operationId": "get-item", "responses": {} } },
            "/b": { "get": { "operationId": "getItem", "responses": {} } },
            "/c": { "get": { "operationId": "type", "responses": {} } }
        }),
        json!({}),
    ));

    let ids: Vec<_> = ir.operations.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["getItem", "getItem2", "type_"]);
    assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::IdentifierCollision]);
}

#[test]
fn test_responses_and_headers() {
    let (ir, diagnostics) = lower_ok(spec(
        json!({
            "/health": {
                "get": {
                    "responses": {
                        "2XX": {
                            "description": "ok",
                            "headers": {
                                "X-Rate-Limit": { "required": true, "schema": { "type": "integer" } }
                            }
                        },
                        "default": { "description": "error" },
                        "bogus": { "description": "ignored" }
                    }
                }
            }
        }),
        json!({}),
    ));

    let op = &ir.operations[0];
    let statuses: Vec<_> = op.responses.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![ResponseStatus::Range(2), ResponseStatus::Default]);
    let header = &op.responses[0].headers[0];
    assert_eq!(header.name, "X-Rate-Limit");
    assert!(header.required);
    assert_eq!(header.ty, TypeRef::Primitive(PrimitiveKind::Int32));
    assert!(op.responses[0].ty.is_none());
    assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::UnsupportedSchema]);
}

#[test]
fn test_swagger2_body_parameter() {
    let (ir, _) = lower_ok(json!({
        "swagger": "2.0",
        "info": { "title": "Legacy", "version": "1" },
        "paths": {
            "/pets": {
                "post": {
                    "operationId": "addPet",
                    "parameters": [
                        { "name": "body", "in": "body", "required": true, "schema": { "$ref": "#/definitions/Pet" } },
                        { "name": "X-Trace", "in": "header", "type": "string" }
                    ],
                    "responses": { "200": { "description": "ok", "schema": { "$ref": "#/definitions/Pet" } } }
                }
            }
        },
        "definitions": { "Pet": { "type": "object", "properties": { "id": { "type": "integer" } } } }
    }));

    let op = &ir.operations[0];
    assert_eq!(op.request_body.as_ref().map(|b| &b.ty), Some(&TypeRef::object("Pet")));
    assert_eq!(op.parameters.len(), 1);
    assert_eq!(op.parameters[0].name, "xTrace");
    assert_eq!(op.parameters[0].ty, TypeRef::string().optional());
    assert_eq!(op.responses[0].ty, Some(TypeRef::object("Pet")));
}

#[test]
fn test_lowering_is_deterministic() {
    let value = spec(
        json!({
            "/": { "get": { "responses": {} } },
            "/users/{id}": {
                "get": {
                    "parameters": [{ "name": "id", "in": "path", "schema": { "type": "string" } }],
                    "responses": {}
                }
            }
        }),
        json!({ "A": { "type": "object", "properties": { "b": { "type": "object", "properties": {} } } } }),
    );

    let (first, _) = lower_ok(value.clone());
    let (second, _) = lower_ok(value);
    assert_eq!(first, second);
}
