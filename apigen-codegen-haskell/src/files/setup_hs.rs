//! Setup.hs template.

use apigen_codegen::render::{RenderContext, RenderError, Rendered, Scope, Template};

/// The `Setup.hs` of a simple cabal build.
pub struct SetupHs;

impl Template for SetupHs {
    fn name(&self) -> &'static str {
        "Setup.hs"
    }

    fn is_supporting(&self) -> bool {
        true
    }

    fn path(&self, _scope: &Scope, _ctx: &RenderContext<'_>) -> String {
        "Setup.hs".to_string()
    }

    fn render(&self, _scope: &Scope, _ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
        Ok(Rendered::File(
            "import Distribution.Simple\n\nmain :: IO ()\nmain = defaultMain\n".to_string(),
        ))
    }
}
