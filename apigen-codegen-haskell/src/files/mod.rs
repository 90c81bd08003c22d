//! File templates of the Haskell Servant target.
//!
//! Each template renders one file of a stack/cabal project:
//!
//! - `lib/<Module>/API.hs` - route types, the backend record and the server
//! - `lib/<Module>/Types.hs` - models with their JSON instances
//! - `<package>.cabal`, `stack.yaml`, `Setup.hs` - build scaffolding

mod api_hs;
mod cabal;
mod setup_hs;
mod stack_yaml;
mod types_hs;

pub use api_hs::ApiHs;
pub use cabal::{CabalFile, cabal_package_name, cabal_version};
pub use setup_hs::SetupHs;
pub use stack_yaml::StackYaml;
pub use types_hs::TypesHs;

use apigen_codegen::{language::IdentifierContext, render::RenderContext};

/// Root module of the generated library, derived from the package name.
pub fn module_name(ctx: &RenderContext<'_>) -> String {
    ctx.config
        .naming
        .base_identifier(&ctx.package_name(), IdentifierContext::Module)
}

/// Whether the run has any type to put in `Types.hs`.
pub fn has_types(ctx: &RenderContext<'_>) -> bool {
    ctx.models().next().is_some() || !ctx.inline_enums().is_empty()
}

/// Standard header comment of generated Haskell modules.
fn header_comment(ctx: &RenderContext<'_>, what: &str) -> Vec<String> {
    let meta = ctx.meta();
    let mut lines = vec![format!(
        "-- | {what} for {} (version {}).",
        crate::escape::comment_text(&meta.title),
        crate::escape::comment_text(&meta.version)
    )];
    lines.push("--".to_string());
    lines.push("-- Generated by apigen. Do not edit.".to_string());
    lines
}
