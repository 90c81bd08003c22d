//! Operations, parameters, bodies and responses.

use apigen_ir::{
    DefaultValue, Operation, ParamLocation, Parameter, RequestBody, Response, ResponseHeader,
    ResponseStatus, TypeRef,
};
use apigen_spec::{RawOperation, RawParameter, RawResponse};
use serde_json::Value;

use super::Lowerer;
use crate::{
    language::IdentifierContext,
    mapper::NameScope,
    pipeline::{BuildError, DiagnosticKind},
};

/// Content type assumed for `in: body` parameters.
const JSON_CONTENT_TYPE: &str = "application/json";

impl<'a> Lowerer<'a> {
    /// Lower every operation in document order.
    pub(super) fn lower_operations(&mut self) -> Result<Vec<Operation>, BuildError> {
        let mut operations = Vec::new();
        for raw in self.reader.operations()? {
            operations.push(self.lower_operation(&raw)?);
        }
        Ok(operations)
    }

    fn lower_operation(&mut self, raw: &RawOperation<'a>) -> Result<Operation, BuildError> {
        let location = format!("paths.{}.{}", raw.path, raw.method.key());

        let raw_id = match raw.operation_id() {
            Some(id) => id.to_string(),
            None => self.synthesize_id(raw),
        };
        let identifier = self.mapper.function_name(&raw_id);
        self.note(&identifier, &location);
        let id = identifier.name;

        let raw_parameters = raw
            .parameters()
            .map_err(|e| located(BuildError::from(e), &location))?;
        let (parameters, body_parameter) =
            self.lower_parameters(&id, &raw_parameters, &location);

        let path = self.lower_path(raw, &parameters)?;

        let request_body = match body_parameter {
            Some(body) => Some(body),
            None => self.lower_request_body(raw, &id, &location)?,
        };

        let raw_responses = raw
            .responses()
            .map_err(|e| located(BuildError::from(e), &location))?;
        let mut responses = Vec::with_capacity(raw_responses.len());
        for response in &raw_responses {
            if let Some(response) = self.lower_response(response, &id, &location)? {
                responses.push(response);
            }
        }

        Ok(Operation {
            id,
            raw_id,
            method: raw.method,
            raw_path: raw.path.to_string(),
            path,
            parameters,
            request_body,
            responses,
            tags: raw.tags().into_iter().map(str::to_string).collect(),
            summary: raw.summary().map(str::to_string),
            description: raw.description().map(str::to_string),
            deprecated: raw.deprecated(),
        })
    }

    /// Base name for an operation without `operationId`: the method followed
    /// by the words of the path (`get users id`), or `get root` for `/`.
    fn synthesize_id(&self, raw: &RawOperation<'a>) -> String {
        let delimiter = &self.config.path_param_delimiter;
        let words: Vec<&str> = raw
            .path
            .split(apigen_ir::PATH_DELIMITER)
            .filter(|component| !component.is_empty())
            .map(|component| delimiter.placeholder(component).unwrap_or(component))
            .collect();

        if words.is_empty() {
            format!("{} root", raw.method.key())
        } else {
            format!("{} {}", raw.method.key(), words.join(" "))
        }
    }

    /// Lower declared parameters. A Swagger 2 `in: body` parameter is
    /// returned separately as the request body.
    fn lower_parameters(
        &mut self,
        operation: &str,
        raw_parameters: &[RawParameter<'a>],
        location: &str,
    ) -> (Vec<Parameter>, Option<RequestBody>) {
        let mut scope = NameScope::new();
        let mut parameters = Vec::with_capacity(raw_parameters.len());
        let mut body = None;

        for raw in raw_parameters {
            let param_location = format!("{location}.parameters.{}", raw.name());
            let Some(kind) = ParamLocation::from_in(raw.location()) else {
                self.warn(
                    DiagnosticKind::UnsupportedSchema,
                    format!(
                        "parameter '{}' has unsupported location '{}'; skipped",
                        raw.name(),
                        raw.location()
                    ),
                    &param_location,
                );
                continue;
            };

            if kind == ParamLocation::Body {
                if body.is_some() {
                    self.warn(
                        DiagnosticKind::UnsupportedSchema,
                        format!("additional body parameter '{}' skipped", raw.name()),
                        &param_location,
                    );
                    continue;
                }
                let ty = self.parameter_type(raw, &format!("{operation} request"), &param_location);
                body = Some(RequestBody {
                    ty,
                    required: raw.required(),
                    content_type: JSON_CONTENT_TYPE.to_string(),
                    description: raw.description().map(str::to_string),
                });
                continue;
            }

            let identifier = self
                .mapper
                .fresh_in(&mut scope, raw.name(), IdentifierContext::Parameter);
            self.note(&identifier, &param_location);

            let required = kind == ParamLocation::Path || raw.required();
            let hint = format!("{operation} {}", raw.name());
            let ty = self.parameter_type(raw, &hint, &param_location);

            parameters.push(Parameter {
                name: identifier.name,
                raw_name: raw.name().to_string(),
                location: kind,
                required,
                ty: if required { ty } else { ty.optional() },
                default: raw.default().and_then(default_value),
                description: raw.description().map(str::to_string),
            });
        }

        (parameters, body)
    }

    fn parameter_type(&mut self, raw: &RawParameter<'a>, hint: &str, location: &str) -> TypeRef {
        match raw.schema() {
            Some(schema) => self.type_ref(schema, hint, location),
            None => {
                self.warn(
                    DiagnosticKind::UnsupportedSchema,
                    format!("parameter '{}' declares no schema; using any", raw.name()),
                    location,
                );
                TypeRef::any()
            }
        }
    }

    fn lower_request_body(
        &mut self,
        raw: &RawOperation<'a>,
        operation: &str,
        location: &str,
    ) -> Result<Option<RequestBody>, BuildError> {
        let body = raw
            .request_body()
            .map_err(|e| located(BuildError::from(e), location))?;
        let Some(body) = body else {
            return Ok(None);
        };
        let Some(schema) = body.schema else {
            return Ok(None);
        };

        let body_location = format!("{location}.requestBody");
        let ty = self.type_ref(schema, &format!("{operation} request"), &body_location);
        Ok(Some(RequestBody {
            ty,
            required: body.required,
            content_type: body.content_type.to_string(),
            description: body.description.map(str::to_string),
        }))
    }

    fn lower_response(
        &mut self,
        raw: &RawResponse<'a>,
        operation: &str,
        location: &str,
    ) -> Result<Option<Response>, BuildError> {
        let response_location = format!("{location}.responses.{}", raw.status);
        let Some(status) = ResponseStatus::parse(raw.status) else {
            self.warn(
                DiagnosticKind::UnsupportedSchema,
                format!("invalid response status '{}'; skipped", raw.status),
                &response_location,
            );
            return Ok(None);
        };

        let hint = format!("{operation} response {status}");
        let ty = raw
            .schema()
            .map(|schema| self.type_ref(schema, &hint, &response_location));

        let raw_headers = raw
            .headers()
            .map_err(|e| located(BuildError::from(e), &response_location))?;
        let mut headers = Vec::with_capacity(raw_headers.len());
        for (name, node) in raw_headers {
            let schema = node.get("schema").unwrap_or(node);
            let header_hint = format!("{operation} {name} header");
            let ty = self.type_ref(schema, &header_hint, &response_location);
            headers.push(ResponseHeader {
                name: name.to_string(),
                ty,
                required: node.get("required").and_then(Value::as_bool).unwrap_or(false),
            });
        }

        Ok(Some(Response {
            status,
            description: raw.description().map(str::to_string),
            ty,
            headers,
        }))
    }
}

/// Attach an operation location to an error that has none.
fn located(error: BuildError, location: &str) -> BuildError {
    match error {
        BuildError::MalformedSpec {
            message,
            location: None,
        } => BuildError::malformed_at(message, location),
        other => other,
    }
}

/// Convert a literal `default` to a default value; structured defaults are dropped.
fn default_value(value: &Value) -> Option<DefaultValue> {
    match value {
        Value::String(s) => Some(DefaultValue::String(s.clone())),
        Value::Bool(b) => Some(DefaultValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(DefaultValue::Int)
            .or_else(|| n.as_f64().map(DefaultValue::Float)),
        _ => None,
    }
}
