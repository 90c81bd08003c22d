//! Normalized URL path templates.
//!
//! A raw route such as `/users/{id}/posts` is parsed (by the IR builder) into
//! a sequence of [`PathSegment`]s and handed to [`PathTemplate::normalize`],
//! which guarantees the shape renderers rely on:
//!
//! - no `Literal` segment is ever empty
//! - no two `Literal` segments are adjacent
//! - a path with no segments at all is represented by a single
//!   [`PathSegment::Root`] instead of an empty literal
//!
//! Renderers that splice segments through a delimiter syntax (Servant's
//! `:>`, for example) can therefore emit one token per segment without ever
//! producing an empty token.

use serde::Serialize;

use crate::TypeRef;

/// The path delimiter used to join merged literals.
pub const PATH_DELIMITER: char = '/';

/// One unit of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    /// Fixed text. Merged literals keep `/` between their components.
    Literal(String),
    /// A placeholder bound to the path parameter with this raw name.
    Parameter { name: String, ty: TypeRef },
    /// The empty route (`/`).
    Root,
}

impl PathSegment {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn parameter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::Parameter {
            name: name.into(),
            ty,
        }
    }

    /// Non-empty `/`-separated components of a literal; empty for other segments.
    pub fn literal_components(&self) -> Vec<&str> {
        match self {
            Self::Literal(text) => text
                .split(PATH_DELIMITER)
                .filter(|part| !part.is_empty())
                .collect(),
            Self::Parameter { .. } | Self::Root => Vec::new(),
        }
    }

    fn is_empty_literal(&self) -> bool {
        match self {
            Self::Literal(text) => text.split(PATH_DELIMITER).all(str::is_empty),
            _ => false,
        }
    }
}

/// A normalized path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    /// Canonicalize raw segments.
    ///
    /// Empty literals are dropped wherever they occur (leading and trailing
    /// slashes as well as `//` inside a route), consecutive literals are
    /// merged, and an empty result becomes `[Root]`. Any `Root` in the input
    /// is treated as empty.
    pub fn normalize(raw: impl IntoIterator<Item = PathSegment>) -> Self {
        let mut segments: Vec<PathSegment> = Vec::new();

        for segment in raw {
            if matches!(segment, PathSegment::Root) || segment.is_empty_literal() {
                continue;
            }

            match (segments.last_mut(), segment) {
                (Some(PathSegment::Literal(prev)), PathSegment::Literal(text)) => {
                    let text = text.trim_matches(PATH_DELIMITER);
                    let prev_trimmed = prev.trim_end_matches(PATH_DELIMITER).len();
                    prev.truncate(prev_trimmed);
                    prev.push(PATH_DELIMITER);
                    prev.push_str(text);
                }
                (_, PathSegment::Literal(text)) => {
                    segments.push(PathSegment::Literal(
                        text.trim_matches(PATH_DELIMITER).to_string(),
                    ));
                }
                (_, other) => segments.push(other),
            }
        }

        if segments.is_empty() {
            segments.push(PathSegment::Root);
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the root route.
    pub fn is_root(&self) -> bool {
        matches!(self.segments.as_slice(), [PathSegment::Root])
    }

    /// Raw names of the parameter placeholders, in path order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Parameter { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Rejoin the segments into a route string, using `{name}` placeholders.
    pub fn to_route(&self) -> String {
        if self.is_root() {
            return PATH_DELIMITER.to_string();
        }

        let mut route = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Literal(text) => {
                    for part in text.split(PATH_DELIMITER).filter(|p| !p.is_empty()) {
                        route.push(PATH_DELIMITER);
                        route.push_str(part);
                    }
                }
                PathSegment::Parameter { name, .. } => {
                    route.push(PATH_DELIMITER);
                    route.push('{');
                    route.push_str(name);
                    route.push('}');
                }
                PathSegment::Root => {}
            }
        }
        route
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_route())
    }
}
