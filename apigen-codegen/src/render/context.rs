//! Read-only views of the IR handed to templates.

use apigen_core::to_kebab_case;
use apigen_ir::{ApiIR, ApiMeta, InlineEnum, Model, Operation, TagGroup};

use super::RenderError;
use crate::target::TargetConfig;

/// Package name used when neither the configuration nor the title gives one.
const FALLBACK_PACKAGE: &str = "api";

/// Everything a template may read.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub ir: &'a ApiIR,
    pub config: &'a TargetConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(ir: &'a ApiIR, config: &'a TargetConfig) -> Self {
        Self { ir, config }
    }

    pub fn meta(&self) -> &'a ApiMeta {
        &self.ir.meta
    }

    /// All operations in declaration order.
    pub fn operations(&self) -> &'a [Operation] {
        &self.ir.operations
    }

    /// Operations grouped by primary tag, groups sorted by tag name.
    pub fn tag_groups(&self) -> Vec<TagGroup<'a>> {
        self.ir.tag_groups()
    }

    /// Operations of one tag group.
    pub fn tag_group(&self, tag: &str) -> Option<TagGroup<'a>> {
        self.ir.tag_groups().into_iter().find(|g| g.tag == tag)
    }

    /// All models in declaration order.
    pub fn models(&self) -> impl Iterator<Item = &'a Model> {
        self.ir.models.iter()
    }

    pub fn inline_enums(&self) -> Vec<InlineEnum<'a>> {
        self.ir.inline_enums()
    }

    /// Look up a referenced model by name.
    pub fn resolve_model(&self, name: &str, referenced_from: &str) -> Result<&'a Model, RenderError> {
        self.ir
            .models
            .get(name)
            .ok_or_else(|| RenderError::MissingModel {
                name: name.to_string(),
                context: referenced_from.to_string(),
            })
    }

    /// Package name: the configured override, else the kebab-cased title.
    pub fn package_name(&self) -> String {
        if let Some(package) = &self.config.package {
            return package.clone();
        }
        let name = to_kebab_case(&self.ir.meta.title);
        if name.is_empty() {
            FALLBACK_PACKAGE.to_string()
        } else {
            name
        }
    }
}
