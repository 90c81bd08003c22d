//! API operations.

use serde::Serialize;

use crate::{HttpMethod, ParamLocation, PathTemplate, TypeRef};

/// One API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    /// Function identifier, unique across the run.
    pub id: String,
    /// Identifier as declared (`operationId`), or the synthesized base name.
    pub raw_id: String,
    pub method: HttpMethod,
    /// Route as written in the document.
    pub raw_path: String,
    pub path: PathTemplate,
    /// Parameters in declaration order (path-level first, then operation-level).
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Responses in declaration order.
    pub responses: Vec<Response>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
}

impl Operation {
    /// Find the declared path parameter bound to a placeholder.
    pub fn path_parameter(&self, raw_name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.location == ParamLocation::Path && p.raw_name == raw_name)
    }

    /// Parameters carried in `location`, in declaration order.
    pub fn parameters_in(&self, location: ParamLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }

    /// The first 2xx response, falling back to `default`.
    pub fn success_response(&self) -> Option<&Response> {
        self.responses
            .iter()
            .find(|r| r.status.is_success())
            .or_else(|| {
                self.responses
                    .iter()
                    .find(|r| r.status == ResponseStatus::Default)
            })
    }

    /// The tag used for grouping: the first declared tag, if any.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Target-safe identifier, unique within the operation.
    pub name: String,
    /// Name on the wire.
    pub raw_name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub ty: TypeRef,
    pub default: Option<DefaultValue>,
    pub description: Option<String>,
}

/// A literal default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub ty: TypeRef,
    pub required: bool,
    /// Media type the body was taken from.
    pub content_type: String,
    pub description: Option<String>,
}

/// A response for one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: ResponseStatus,
    pub description: Option<String>,
    /// Body type; `None` when the response has no content.
    pub ty: Option<TypeRef>,
    pub headers: Vec<ResponseHeader>,
}

/// A response header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseHeader {
    pub name: String,
    pub ty: TypeRef,
    pub required: bool,
}

/// Response status key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// An exact status code.
    Code(u16),
    /// A status class such as `2XX`, stored as its first digit.
    Range(u8),
    Default,
}

impl ResponseStatus {
    /// Parse a response key (`200`, `2XX`, `default`).
    pub fn parse(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("default") {
            return Some(Self::Default);
        }
        if let Ok(code) = key.parse::<u16>() {
            return (100..=599).contains(&code).then_some(Self::Code(code));
        }
        let bytes = key.as_bytes();
        if bytes.len() == 3 && bytes[1..].eq_ignore_ascii_case(b"xx") {
            let class = bytes[0].wrapping_sub(b'0');
            return (1..=5).contains(&class).then_some(Self::Range(class));
        }
        None
    }

    pub fn is_success(&self) -> bool {
        match self {
            Self::Code(code) => (200..300).contains(code),
            Self::Range(class) => *class == 2,
            Self::Default => false,
        }
    }

    /// A concrete code for renderers that need one.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Range(class) => Some(u16::from(*class) * 100),
            Self::Default => None,
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Range(class) => write!(f, "{class}XX"),
            Self::Default => f.write_str("default"),
        }
    }
}
