use apigen_codegen::{
    GenerateOptions, GenerationResult, generate,
    pipeline::{DiagnosticKind, Severity},
};
use apigen_codegen_haskell::{config, target, target_with};
use apigen_core::MemorySink;
use apigen_spec::SpecDocument;
use serde_json::{Value, json};

fn run(spec: Value) -> (MemorySink, GenerationResult) {
    let document = SpecDocument::from_value(spec);
    let mut sink = MemorySink::new();
    let result = generate(&document, &target(), GenerateOptions::default(), &mut sink)
        .expect("generation succeeds");
    (sink, result)
}

fn file<'a>(sink: &'a MemorySink, path: &str) -> &'a str {
    sink.get(path)
        .unwrap_or_else(|| panic!("missing {path}; have {:?}", sink.files().map(|(p, _)| p).collect::<Vec<_>>()))
}

fn health_spec() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": { "title": "Health", "version": "1.0.0" },
        "paths": {
            "/": {
                "get": { "responses": { "200": { "description": "ok" } } }
            }
        }
    })
}

fn petstore_spec() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": { "title": "Pet Store", "version": "1.2.0-beta" },
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "summary": "List all pets",
                    "tags": ["pets"],
                    "parameters": [
                        { "name": "limit", "in": "query", "schema": { "type": "integer", "format": "int32" } },
                        { "name": "tags", "in": "query", "schema": { "type": "array", "items": { "type": "string" } } },
                        { "name": "X-Request-Id", "in": "header", "required": true, "schema": { "type": "string" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "A page of pets",
                            "headers": {
                                "X-Rate-Limit": { "schema": { "type": "integer", "format": "int32" } }
                            },
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "operationId": "createPet",
                    "tags": ["pets"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Created",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
                            }
                        }
                    }
                }
            },
            "/users/{id}/posts": {
                "get": {
                    "operationId": "getUserPosts",
                    "tags": ["users"],
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "Posts",
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Post" } }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "tag": { "type": "string", "description": "Free-form label" },
                        "status": { "$ref": "#/components/schemas/Status" }
                    }
                },
                "Status": { "type": "string", "enum": ["available", "sold"] },
                "Post": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "publishedAt": { "type": "string", "format": "date-time" }
                    }
                }
            }
        }
    })
}

#[test]
fn test_root_route_has_no_empty_literal() {
    let (sink, _) = run(health_spec());
    let api = file(&sink, "lib/Health/API.hs");

    assert!(!api.contains("\"\""), "empty path literal in:\n{api}");
    insta::assert_snapshot!(api, @r#"
    {-# LANGUAGE DataKinds #-}
    {-# LANGUAGE KindSignatures #-}
    {-# LANGUAGE RecordWildCards #-}
    {-# LANGUAGE TypeOperators #-}

    -- | Servant API for Health (version 1.0.0).
    --
    -- Generated by apigen. Do not edit.
    module Health.API
      ( API
      , api
      , DefaultAPI
      , HealthBackend (..)
      , serverFromBackend
      ) where

    import Data.Kind (Type)
    import Servant

    -- | Operations tagged @default@.
    type DefaultAPI =
      -- getRoot: GET /
      Verb 'GET 200 '[JSON] NoContent

    -- | The complete API.
    type API =
      DefaultAPI

    api :: Proxy API
    api = Proxy

    -- | Handlers for every operation, running in @m@.
    data HealthBackend (m :: Type -> Type) = HealthBackend
      { getRoot :: m NoContent
      }

    -- | Serve the API from a backend.
    serverFromBackend :: HealthBackend Handler -> Server API
    serverFromBackend HealthBackend {..} =
      getRoot
    "#);
}

#[test]
fn test_root_marker_is_rendered_when_configured() {
    let document = SpecDocument::from_value(health_spec());
    let target = target_with(config().root_marker("\"index\""));
    let mut sink = MemorySink::new();
    generate(&document, &target, GenerateOptions::default(), &mut sink).unwrap();

    let api = file(&sink, "lib/Health/API.hs");
    assert!(api.contains("  \"index\" :> Verb 'GET 200 '[JSON] NoContent"));
}

#[test]
fn test_trailing_and_doubled_slashes_render_like_clean_paths() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Paths", "version": "1" },
        "paths": {
            "/api//v1/": { "get": { "operationId": "version", "responses": { "204": { "description": "none" } } } }
        }
    });
    let (sink, _) = run(spec);
    let api = file(&sink, "lib/Paths/API.hs");
    assert!(api.contains("  \"api\" :> \"v1\" :> Verb 'GET 204 '[JSON] NoContent"));
    assert!(!api.contains("\"\""));
}

#[test]
fn test_capture_between_literals() {
    let (sink, _) = run(petstore_spec());
    let api = file(&sink, "lib/PetStore/API.hs");

    assert!(api.contains(
        "  \"users\" :> Capture \"id\" Integer :> \"posts\" :> Verb 'GET 200 '[JSON] [Post]"
    ));
    assert!(api.contains(", getUserPosts :: Integer -> m [Post]"));
}

#[test]
fn test_query_header_and_body_combinators() {
    let (sink, _) = run(petstore_spec());
    let api = file(&sink, "lib/PetStore/API.hs");

    assert!(api.contains(
        "\"pets\" :> QueryParam \"limit\" Int :> QueryParams \"tags\" Text \
         :> Header' '[Required, Strict] \"X-Request-Id\" Text \
         :> Verb 'GET 200 '[JSON] (Headers '[Header \"X-Rate-Limit\" Int] [Pet])"
    ));
    assert!(api.contains(
        "    listPets :: Maybe Int -> [Text] -> Text -> m (Headers '[Header \"X-Rate-Limit\" Int] [Pet])"
    ));
    assert!(api.contains("{ -- | List all pets"));
    assert!(api.contains(":<|> \"pets\" :> ReqBody '[JSON] Pet :> Verb 'POST 201 '[JSON] Pet"));
    assert!(api.contains(", createPet :: Pet -> m Pet"));
    assert!(api.contains("import Data.Text (Text)"));
}

#[test]
fn test_params_without_url_encoding_fall_back_to_text() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Search", "version": "1" },
        "paths": {
            "/q": {
                "get": {
                    "operationId": "search",
                    "parameters": [
                        { "name": "f", "in": "query", "schema": { "$ref": "#/components/schemas/Pet" } },
                        { "name": "kind", "in": "query", "schema": { "$ref": "#/components/schemas/Kind" } },
                        { "name": "X-Ids", "in": "header", "schema": { "type": "array", "items": { "type": "string" } } }
                    ],
                    "responses": { "200": { "description": "ok" } }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
                "Kind": { "type": "string", "enum": ["cat", "dog"] }
            }
        }
    });
    let (sink, result) = run(spec);
    let api = file(&sink, "lib/Search/API.hs");

    assert!(api.contains(
        "\"q\" :> QueryParam \"f\" Text :> QueryParam \"kind\" Kind :> Header \"X-Ids\" Text \
         :> Verb 'GET 200 '[JSON] NoContent"
    ));
    assert!(api.contains("search :: Maybe Text -> Maybe Kind -> Maybe Text -> m NoContent"));

    let warnings: Vec<_> = result.warnings().collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|d| d.kind == DiagnosticKind::UnsupportedSchema));
    assert!(warnings.iter().all(|d| d.location.as_deref() == Some("lib/Search/API.hs")));
    assert_eq!(
        warnings[0].message,
        "query parameter 'f' of operation 'search' has type Pet with no URL encoding; rendered as Text"
    );
    assert!(warnings[1].message.starts_with("header 'X-Ids' of operation 'search' has type [Text]"));
}

#[test]
fn test_tag_groups_combine_into_api() {
    let (sink, _) = run(petstore_spec());
    let api = file(&sink, "lib/PetStore/API.hs");

    assert!(api.contains("type PetsAPI ="));
    assert!(api.contains("type UsersAPI ="));
    assert!(api.contains("type API =\n  PetsAPI\n  :<|> UsersAPI\n"));
    assert!(api.contains(
        "serverFromBackend PetStoreBackend {..} =\n  (listPets :<|> createPet)\n  :<|> getUserPosts\n"
    ));
    assert!(api.contains("import PetStore.Types"));
}

#[test]
fn test_records_and_enums() {
    let (sink, _) = run(petstore_spec());
    let types = file(&sink, "lib/PetStore/Types.hs");

    assert!(types.contains("module PetStore.Types\n  ( Pet (..)\n  , Status (..)\n  , Post (..)\n  ) where"));
    assert!(types.contains("data Pet = Pet\n  { petId :: Integer\n  , petName :: Text\n  , petTag :: Maybe Text\n    -- ^ Free-form label\n  , petStatus :: Maybe Status\n  }"));
    assert!(types.contains("  \"petId\" -> \"id\"\n"));
    assert!(types.contains("parseJSON = Aeson.genericParseJSON petJsonOptions"));

    assert!(types.contains("data Status\n  = StatusAvailable\n  | StatusSold\n"));
    assert!(types.contains("    \"sold\" -> Right StatusSold\n"));
    assert!(types.contains("import Data.Time (UTCTime)"));
    assert!(types.contains("import Web.HttpApiData (FromHttpApiData (..), ToHttpApiData (..))"));
}

#[test]
fn test_supporting_files() {
    let (sink, result) = run(petstore_spec());

    assert_eq!(
        result.files_written,
        vec![
            "lib/PetStore/API.hs",
            "lib/PetStore/Types.hs",
            "pet-store.cabal",
            "stack.yaml",
            "Setup.hs",
        ]
    );

    let cabal = file(&sink, "pet-store.cabal");
    assert!(cabal.contains("name:               pet-store\n"));
    assert!(cabal.contains("version:            1.2.0\n"));
    assert!(cabal.contains("    PetStore.API\n    PetStore.Types\n"));
    assert!(cabal.contains("    , servant-server\n"));
    assert!(file(&sink, "stack.yaml").starts_with("resolver: lts-"));
    assert!(file(&sink, "Setup.hs").contains("main = defaultMain"));
}

#[test]
fn test_empty_api() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Nothing", "version": "0.0.1" },
        "paths": {}
    });
    let (sink, result) = run(spec);
    let api = file(&sink, "lib/Nothing/API.hs");

    assert!(api.contains("type API = EmptyAPI"));
    assert!(api.contains("data NothingBackend (m :: Type -> Type) = NothingBackend\n"));
    assert!(api.contains("serverFromBackend _ = emptyServer"));
    assert!(!api.contains("import Nothing.Types"));

    assert!(sink.get("lib/Nothing/Types.hs").is_none());
    assert_eq!(result.files_elided, vec!["lib/Nothing/Types.hs"]);
    assert!(!file(&sink, "nothing.cabal").contains("Nothing.Types"));
}

#[test]
fn test_cyclic_models() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Tree", "version": "1" },
        "paths": {},
        "components": {
            "schemas": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } },
                        "parent": { "$ref": "#/components/schemas/Node" }
                    }
                }
            }
        }
    });
    let (sink, result) = run(spec);
    let types = file(&sink, "lib/Tree/Types.hs");

    assert!(types.contains("  { nodeChildren :: Maybe [Node]\n  , nodeParent :: Maybe Node\n"));
    assert!(result.diagnostics.iter().all(|d| d.severity != Severity::Error));
}

#[test]
fn test_colliding_schema_names() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Clash", "version": "1" },
        "paths": {},
        "components": {
            "schemas": {
                "My-Model": { "type": "object", "properties": { "id": { "type": "string" } } },
                "My_Model": { "type": "object", "properties": { "id": { "type": "string" } } },
                "Text": { "type": "string" }
            }
        }
    });
    let (sink, result) = run(spec);
    let types = file(&sink, "lib/Clash/Types.hs");

    assert!(types.contains("data MyModel = MyModel\n  { myModelId :: Maybe Text\n"));
    assert!(types.contains("data MyModel2 = MyModel2\n  { myModel2Id :: Maybe Text\n"));
    assert!(types.contains("newtype Text_ = Text_ Text"));
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::IdentifierCollision && d.severity == Severity::Info));
}

#[test]
fn test_colliding_enum_values() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Flags", "version": "1" },
        "paths": {},
        "components": {
            "schemas": {
                "Status": { "type": "string", "enum": ["active", "ACTIVE", "in-use", "in_use"] }
            }
        }
    });
    let (sink, result) = run(spec);
    let types = file(&sink, "lib/Flags/Types.hs");

    assert!(types.contains("data Status\n  = StatusActive\n  | StatusActive2\n  | StatusInUse\n  | StatusInUse2\n"));
    assert!(types.contains("    \"in_use\" -> Right StatusInUse2\n"));

    let notices: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::IdentifierCollision)
        .collect();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|d| d.severity == Severity::Info));
    assert!(notices.iter().all(|d| d.location.as_deref() == Some("lib/Flags/Types.hs")));
    assert!(notices[0].message.contains("'Status.ACTIVE'"));
    assert!(notices[0].message.contains("renamed to 'StatusActive2'"));
    assert!(notices[1].message.contains("renamed to 'StatusInUse2'"));
}

#[test]
fn test_keywords_are_escaped() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Keywords", "version": "1" },
        "paths": {
            "/types": { "get": { "operationId": "type", "responses": { "204": { "description": "none" } } } },
            "/api": { "get": { "operationId": "api", "responses": { "204": { "description": "none" } } } }
        }
    });
    let (sink, _) = run(spec);
    let api = file(&sink, "lib/Keywords/API.hs");

    assert!(api.contains("{ type_ :: m NoContent"));
    assert!(api.contains(", api_ :: m NoContent"));
    assert!(api.contains("  type_\n  :<|> api_\n") || api.contains("  type_ :<|> api_\n"));
}

#[test]
fn test_discriminated_union() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Zoo", "version": "1" },
        "paths": {},
        "components": {
            "schemas": {
                "Animal": {
                    "oneOf": [
                        { "$ref": "#/components/schemas/Cat" },
                        { "$ref": "#/components/schemas/Dog" }
                    ],
                    "discriminator": {
                        "propertyName": "kind",
                        "mapping": { "cat": "#/components/schemas/Cat", "dog": "#/components/schemas/Dog" }
                    }
                },
                "Cat": { "type": "object", "properties": { "lives": { "type": "integer" } } },
                "Dog": { "type": "object", "properties": { "good": { "type": "boolean" } } }
            }
        }
    });
    let (sink, _) = run(spec);
    let types = file(&sink, "lib/Zoo/Types.hs");

    assert!(types.contains("data Animal\n  = AnimalCat Cat\n  | AnimalDog Dog\n"));
    assert!(types.contains("tag <- object Aeson..: \"kind\""));
    assert!(types.contains("\"dog\" -> AnimalDog <$> parseJSON (Aeson.Object object)"));
}

#[test]
fn test_output_is_deterministic() {
    let (first, _) = run(petstore_spec());
    let (second, _) = run(petstore_spec());
    assert_eq!(first.into_files(), second.into_files());
}
