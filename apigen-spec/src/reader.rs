//! A thin typed view over a parsed specification tree.
//!
//! The reader performs no transformation: every accessor hands back borrowed
//! nodes from the document. The only checks it makes are that the required
//! top-level sections exist and that local `$ref`s point somewhere.

use apigen_ir::HttpMethod;
use serde_json::{Map, Value};

use crate::{Error, Result, SpecDocument};

/// Maximum number of `$ref` hops followed before giving up.
const MAX_REF_DEPTH: usize = 32;

/// Media type preferred when a body declares several.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Typed accessors over a specification document.
#[derive(Debug, Clone, Copy)]
pub struct SpecReader<'a> {
    root: &'a Value,
    paths: &'a Map<String, Value>,
}

/// `info` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecInfo<'a> {
    pub title: &'a str,
    pub version: &'a str,
    pub description: Option<&'a str>,
}

/// Shared definitions from `components` (or the Swagger 2 top-level maps).
#[derive(Debug, Clone, Copy, Default)]
pub struct Components<'a> {
    pub schemas: Option<&'a Map<String, Value>>,
    pub parameters: Option<&'a Map<String, Value>>,
    pub responses: Option<&'a Map<String, Value>>,
    pub request_bodies: Option<&'a Map<String, Value>>,
    pub headers: Option<&'a Map<String, Value>>,
}

impl<'a> SpecReader<'a> {
    /// Create a reader, failing if `info` or `paths` is missing.
    pub fn new(document: &'a SpecDocument) -> Result<Self> {
        Self::from_value(document.root())
    }

    pub fn from_value(root: &'a Value) -> Result<Self> {
        if !root.is_object() {
            return Err(Error::malformed("", "document root must be an object"));
        }
        if !root.get("info").is_some_and(Value::is_object) {
            return Err(Error::malformed("info", "missing required 'info' object"));
        }
        let paths = root
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::malformed("paths", "missing required 'paths' object"))?;

        Ok(Self { root, paths })
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn info(&self) -> SpecInfo<'a> {
        let info = &self.root["info"];
        SpecInfo {
            title: str_field(info, "title").unwrap_or_default(),
            version: str_field(info, "version").unwrap_or_default(),
            description: str_field(info, "description"),
        }
    }

    /// Operations in document order: paths in declaration order, and within a
    /// path item the methods in the order they are declared.
    ///
    /// A path item whose `$ref` cannot be resolved, or that is not an object,
    /// is a malformed document.
    pub fn operations(&self) -> Result<Vec<RawOperation<'a>>> {
        let mut operations = Vec::new();

        for (path, item) in self.paths {
            let section = format!("paths.{path}");
            let item = self.resolve(item).map_err(|e| match *e {
                Error::UnresolvedReference { reference } => Error::malformed(
                    section.clone(),
                    format!("unresolved path item reference '{reference}'"),
                ),
                other => Box::new(other),
            })?;
            let item = item
                .as_object()
                .ok_or_else(|| Error::malformed(section, "path item must be an object"))?;

            for (key, node) in item {
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };
                if !node.is_object() {
                    continue;
                }
                operations.push(RawOperation {
                    reader: *self,
                    path,
                    method,
                    node,
                    path_item: item,
                });
            }
        }

        Ok(operations)
    }

    /// Named schemas in declaration order.
    pub fn schemas(&self) -> Vec<(&'a str, &'a Value)> {
        self.components()
            .schemas
            .map(|schemas| schemas.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default()
    }

    /// Shared components. Swagger 2 style top-level `definitions`,
    /// `parameters` and `responses` are used when `components` is absent.
    pub fn components(&self) -> Components<'a> {
        match self.root.get("components") {
            Some(components) => Components {
                schemas: object_field(components, "schemas"),
                parameters: object_field(components, "parameters"),
                responses: object_field(components, "responses"),
                request_bodies: object_field(components, "requestBodies"),
                headers: object_field(components, "headers"),
            },
            None => Components {
                schemas: object_field(self.root, "definitions"),
                parameters: object_field(self.root, "parameters"),
                responses: object_field(self.root, "responses"),
                request_bodies: None,
                headers: None,
            },
        }
    }

    /// Look up a local JSON pointer reference (`#/components/schemas/Pet`).
    pub fn resolve_ref(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.root);
        }
        let mut current = self.root;
        for token in pointer.strip_prefix('/')?.split('/') {
            let token = unescape_pointer(token);
            current = match current {
                Value::Object(map) => map.get(&token)?,
                Value::Array(items) => items.get(token.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Follow `$ref` chains until a concrete node is reached.
    pub fn resolve(&self, node: &'a Value) -> Result<&'a Value> {
        let mut current = node;
        for _ in 0..MAX_REF_DEPTH {
            let Some(reference) = ref_of(current) else {
                return Ok(current);
            };
            current = self
                .resolve_ref(reference)
                .ok_or_else(|| Error::unresolved(reference))?;
        }
        Err(Error::unresolved(ref_of(current).unwrap_or_default()))
    }
}

/// One operation under a path item.
#[derive(Debug, Clone, Copy)]
pub struct RawOperation<'a> {
    reader: SpecReader<'a>,
    /// Route as written.
    pub path: &'a str,
    pub method: HttpMethod,
    pub node: &'a Value,
    path_item: &'a Map<String, Value>,
}

impl<'a> RawOperation<'a> {
    pub fn operation_id(&self) -> Option<&'a str> {
        str_field(self.node, "operationId").filter(|id| !id.trim().is_empty())
    }

    pub fn tags(&self) -> Vec<&'a str> {
        self.node
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<&'a str> {
        str_field(self.node, "summary")
    }

    pub fn description(&self) -> Option<&'a str> {
        str_field(self.node, "description")
    }

    pub fn deprecated(&self) -> bool {
        self.node
            .get("deprecated")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Parameters with `$ref`s resolved: path-level parameters first, then
    /// operation parameters. An operation parameter replaces a path-level one
    /// with the same `(name, in)` in place.
    pub fn parameters(&self) -> Result<Vec<RawParameter<'a>>> {
        let mut merged: Vec<RawParameter<'a>> = Vec::new();

        let path_level = self.path_item.get("parameters").and_then(Value::as_array);
        let op_level = self.node.get("parameters").and_then(Value::as_array);

        for node in path_level.into_iter().chain(op_level).flatten() {
            let param = RawParameter {
                node: self.reader.resolve(node)?,
            };
            match merged
                .iter_mut()
                .find(|p| p.name() == param.name() && p.location() == param.location())
            {
                Some(existing) => *existing = param,
                None => merged.push(param),
            }
        }

        Ok(merged)
    }

    /// The `requestBody` (OpenAPI 3). Swagger 2 bodies are `in: body` parameters.
    pub fn request_body(&self) -> Result<Option<RawRequestBody<'a>>> {
        let Some(node) = self.node.get("requestBody") else {
            return Ok(None);
        };
        let node = self.reader.resolve(node)?;
        let (content_type, schema) = match preferred_content(node) {
            Some((content_type, media)) => (content_type, media.get("schema")),
            None => ("", None),
        };

        Ok(Some(RawRequestBody {
            content_type,
            schema,
            required: node.get("required").and_then(Value::as_bool).unwrap_or(false),
            description: str_field(node, "description"),
        }))
    }

    /// Responses in declaration order, with `$ref`s resolved.
    pub fn responses(&self) -> Result<Vec<RawResponse<'a>>> {
        let Some(responses) = self.node.get("responses").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        responses
            .iter()
            .map(|(status, node)| {
                Ok(RawResponse {
                    reader: self.reader,
                    status,
                    node: self.reader.resolve(node)?,
                })
            })
            .collect()
    }
}

/// A parameter node (resolved).
#[derive(Debug, Clone, Copy)]
pub struct RawParameter<'a> {
    pub node: &'a Value,
}

impl<'a> RawParameter<'a> {
    pub fn name(&self) -> &'a str {
        str_field(self.node, "name").unwrap_or_default()
    }

    /// The raw `in` value.
    pub fn location(&self) -> &'a str {
        str_field(self.node, "in").unwrap_or_default()
    }

    pub fn required(&self) -> bool {
        self.node
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The parameter's schema: `schema` when present, otherwise the node
    /// itself when it carries an inline `type` (Swagger 2 non-body parameters).
    pub fn schema(&self) -> Option<&'a Value> {
        self.node
            .get("schema")
            .or_else(|| self.node.get("type").map(|_| self.node))
    }

    pub fn default(&self) -> Option<&'a Value> {
        self.node
            .get("default")
            .or_else(|| self.schema().and_then(|s| s.get("default")))
    }

    pub fn description(&self) -> Option<&'a str> {
        str_field(self.node, "description")
    }
}

/// A request body.
#[derive(Debug, Clone, Copy)]
pub struct RawRequestBody<'a> {
    /// Chosen media type; empty when the body declares no content.
    pub content_type: &'a str,
    pub schema: Option<&'a Value>,
    pub required: bool,
    pub description: Option<&'a str>,
}

/// A response node for one status key (resolved).
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    reader: SpecReader<'a>,
    pub status: &'a str,
    pub node: &'a Value,
}

impl<'a> RawResponse<'a> {
    pub fn description(&self) -> Option<&'a str> {
        str_field(self.node, "description").filter(|d| !d.is_empty())
    }

    /// Body schema: from `content` (OpenAPI 3) or `schema` (Swagger 2).
    pub fn schema(&self) -> Option<&'a Value> {
        match preferred_content(self.node) {
            Some((_, media)) => media.get("schema"),
            None => self.node.get("schema"),
        }
    }

    /// Headers in declaration order, with `$ref`s resolved.
    pub fn headers(&self) -> Result<Vec<(&'a str, &'a Value)>> {
        let Some(headers) = self.node.get("headers").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };
        headers
            .iter()
            .map(|(name, node)| Ok((name.as_str(), self.reader.resolve(node)?)))
            .collect()
    }
}

/// The `$ref` target of a node, if it is a reference.
pub fn ref_of(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// The last pointer token of a reference (`#/components/schemas/Pet` → `Pet`).
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

fn unescape_pointer(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn object_field<'a>(node: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    node.get(key).and_then(Value::as_object)
}

fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}

/// Pick the media type entry of a `content` map, preferring JSON.
fn preferred_content(node: &Value) -> Option<(&str, &Value)> {
    let content = node.get("content").and_then(Value::as_object)?;
    content
        .get_key_value(JSON_MEDIA_TYPE)
        .or_else(|| content.iter().find(|(k, _)| k.ends_with("+json")))
        .or_else(|| content.iter().next())
        .map(|(k, v)| (k.as_str(), v))
}
