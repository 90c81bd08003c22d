//! stack.yaml template.

use apigen_codegen::{
    builder::CodeBuilder,
    render::{RenderContext, RenderError, Rendered, Scope, Template},
};

/// Stackage snapshot the generated project builds against.
pub const STACK_RESOLVER: &str = "lts-22.43";

/// The `stack.yaml` of the generated project.
pub struct StackYaml;

impl Template for StackYaml {
    fn name(&self) -> &'static str {
        "stack.yaml"
    }

    fn is_supporting(&self) -> bool {
        true
    }

    fn path(&self, _scope: &Scope, _ctx: &RenderContext<'_>) -> String {
        "stack.yaml".to_string()
    }

    fn render(&self, _scope: &Scope, _ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
        let content = CodeBuilder::haskell()
            .line(&format!("resolver: {STACK_RESOLVER}"))
            .line("packages:")
            .indent()
            .line("- .")
            .build();
        Ok(Rendered::File(content))
    }
}
