//! Planning and rendering output files.

use std::collections::HashMap;

use rayon::prelude::*;

use super::{RenderContext, RenderError, Rendered, Scope, Template, TemplateSet};

/// Options affecting which files are rendered and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render supporting (build scaffolding) templates.
    pub supporting_files: bool,
    /// Render files on the rayon thread pool.
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            supporting_files: true,
            parallel: false,
        }
    }
}

/// One file to render.
pub struct PlannedFile<'t> {
    pub template: &'t dyn Template,
    pub scope: Scope,
    pub path: String,
}

impl std::fmt::Debug for PlannedFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannedFile")
            .field("template", &self.template.name())
            .field("scope", &self.scope)
            .field("path", &self.path)
            .finish()
    }
}

/// Outcome of rendering one planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: String,
    pub template: &'static str,
    pub result: Result<Rendered, RenderError>,
}

/// List the files a template set produces for a context, in template order
/// then scope order.
pub fn plan<'t>(
    templates: &'t TemplateSet,
    ctx: &RenderContext<'_>,
    options: RenderOptions,
) -> Vec<PlannedFile<'t>> {
    templates
        .iter()
        .filter(|template| options.supporting_files || !template.is_supporting())
        .flat_map(|template| {
            template.scopes(ctx).into_iter().map(move |scope| PlannedFile {
                path: template.path(&scope, ctx),
                template,
                scope,
            })
        })
        .collect()
}

/// Render every planned file.
///
/// Each file is rendered independently; a failure only affects its own
/// entry. Results are returned in plan order whether or not rendering ran in
/// parallel. A path planned twice fails for every template after the first.
pub fn render_all(
    templates: &TemplateSet,
    ctx: &RenderContext<'_>,
    options: RenderOptions,
) -> Vec<RenderedFile> {
    let planned = plan(templates, ctx, options);
    tracing::debug!(files = planned.len(), parallel = options.parallel, "rendering");

    let render_one = |file: &PlannedFile<'_>| {
        tracing::trace!(template = file.template.name(), path = %file.path, "render");
        RenderedFile {
            path: file.path.clone(),
            template: file.template.name(),
            result: file.template.render(&file.scope, ctx),
        }
    };

    let mut rendered: Vec<RenderedFile> = if options.parallel {
        planned.par_iter().map(render_one).collect()
    } else {
        planned.iter().map(render_one).collect()
    };

    let mut owners: HashMap<String, &'static str> = HashMap::new();
    for file in &mut rendered {
        match owners.get(&file.path) {
            Some(owner) => {
                file.result = Err(RenderError::template(
                    file.template,
                    format!("path '{}' is already produced by '{owner}'", file.path),
                ));
            }
            None => {
                owners.insert(file.path.clone(), file.template);
            }
        }
    }

    rendered
}
