//! The complete IR for one generation run.

use std::collections::HashSet;

use serde::Serialize;

use crate::{ModelTable, Operation, TypeRef};

/// Tag assigned to operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// The language-agnostic representation of an API.
///
/// Built once by the IR builder and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiIR {
    pub meta: ApiMeta,
    pub models: ModelTable,
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
}

/// Document-level information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiMeta {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// Operations sharing a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagGroup<'a> {
    pub tag: &'a str,
    pub operations: Vec<&'a Operation>,
}

/// An enum type declared inline (in a field or parameter) rather than as a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineEnum<'a> {
    pub name: &'a str,
    pub values: &'a [String],
}

impl ApiIR {
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// Distinct tags in first-seen order (primary tags only).
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.operations
            .iter()
            .map(|op| op.primary_tag().unwrap_or(DEFAULT_TAG))
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Operations grouped by primary tag, groups sorted by tag name.
    ///
    /// The sort is stable and operations keep declaration order inside each
    /// group, so the result is deterministic for a given document.
    pub fn tag_groups(&self) -> Vec<TagGroup<'_>> {
        let mut groups: Vec<TagGroup<'_>> = self
            .tags()
            .into_iter()
            .map(|tag| TagGroup {
                tag,
                operations: Vec::new(),
            })
            .collect();

        for op in &self.operations {
            let tag = op.primary_tag().unwrap_or(DEFAULT_TAG);
            if let Some(group) = groups.iter_mut().find(|g| g.tag == tag) {
                group.operations.push(op);
            }
        }

        groups.sort_by(|a, b| a.tag.cmp(b.tag));
        groups
    }

    /// Inline enums used by models and operations, deduplicated by name in
    /// first-seen order.
    pub fn inline_enums(&self) -> Vec<InlineEnum<'_>> {
        let mut types: Vec<&TypeRef> = Vec::new();
        for model in self.models.iter() {
            types.extend(model.types());
        }
        for op in &self.operations {
            types.extend(op.parameters.iter().map(|p| &p.ty));
            types.extend(op.request_body.iter().map(|b| &b.ty));
            for response in &op.responses {
                types.extend(response.ty.iter());
                types.extend(response.headers.iter().map(|h| &h.ty));
            }
        }

        let mut seen = HashSet::new();
        let mut enums = Vec::new();
        for ty in types {
            ty.walk(&mut |inner| {
                if let TypeRef::Enum { name, values } = inner {
                    if seen.insert(name.as_str()) {
                        enums.push(InlineEnum {
                            name: name.as_str(),
                            values: values.as_slice(),
                        });
                    }
                }
            });
        }

        enums
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpMethod, ParamLocation, Parameter, PathTemplate};

    fn op(id: &str, tags: &[&str]) -> Operation {
        Operation {
            id: id.into(),
            raw_id: id.into(),
            method: HttpMethod::Get,
            raw_path: "/".into(),
            path: PathTemplate::normalize(Vec::new()),
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: None,
            description: None,
            deprecated: false,
        }
    }

    #[test]
    fn test_tag_groups_sorted_and_stable() {
        let api = ApiIR {
            operations: vec![
                op("listUsers", &["users"]),
                op("health", &[]),
                op("listPets", &["pets", "users"]),
                op("getUser", &["users"]),
            ],
            ..Default::default()
        };

        let groups = api.tag_groups();
        let summary: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.tag, g.operations.iter().map(|o| o.id.as_str()).collect()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("default", vec!["health"]),
                ("pets", vec!["listPets"]),
                ("users", vec!["listUsers", "getUser"]),
            ]
        );
        assert_eq!(api.tags(), vec!["users", "default", "pets"]);
    }

    #[test]
    fn test_tag_groups_empty() {
        assert!(ApiIR::default().tag_groups().is_empty());
    }

    #[test]
    fn test_inline_enums_deduplicated() {
        let status = TypeRef::Enum {
            name: "Status".into(),
            values: vec!["active".into(), "inactive".into()],
        };
        let mut first = op("a", &[]);
        let mut second = op("b", &[]);
        for operation in [&mut first, &mut second] {
            operation.parameters.push(Parameter {
                name: "status".into(),
                raw_name: "status".into(),
                location: ParamLocation::Query,
                required: false,
                ty: TypeRef::array(status.clone()).optional(),
                default: None,
                description: None,
            });
        }

        let api = ApiIR {
            operations: vec![first, second],
            ..Default::default()
        };

        let enums = api.inline_enums();
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].name, "Status");
        assert_eq!(enums[0].values, ["active", "inactive"]);
        assert_eq!(api.operation("b").map(|o| o.id.as_str()), Some("b"));
    }
}
