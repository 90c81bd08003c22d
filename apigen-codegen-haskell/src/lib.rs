//! Haskell Servant target for the apigen code generator.
//!
//! Renders a stack/cabal library with a Servant route type per tag, a
//! backend record of handlers, and aeson-backed model types.

mod escape;
pub mod files;
mod naming;
mod type_mapper;

use apigen_codegen::{Target, TargetConfig, render::TemplateSet};

pub use escape::{comment_text, string_literal};
pub use files::{ApiHs, CabalFile, SetupHs, StackYaml, TypesHs, module_name};
pub use naming::{GENERATED_NAMES, HASKELL_KEYWORDS, HASKELL_NAMING, lower_first};
pub use type_mapper::{HaskellTypeMapper, Imports};

/// Name the target is selected by.
pub const TARGET_NAME: &str = "haskell-servant";

/// Default configuration: Haskell naming, `{name}` placeholders and no root
/// marker.
pub fn config() -> TargetConfig {
    TargetConfig::new(TARGET_NAME, HASKELL_NAMING).reserved_words(GENERATED_NAMES.iter().copied())
}

/// The templates of the target, in output order.
pub fn templates() -> TemplateSet {
    TemplateSet::new()
        .with(ApiHs)
        .with(TypesHs)
        .with(CabalFile)
        .with(StackYaml)
        .with(SetupHs)
}

/// The target with its default configuration.
pub fn target() -> Target {
    target_with(config())
}

/// The target with a customized configuration.
pub fn target_with(config: TargetConfig) -> Target {
    Target::new(config, templates())
}
