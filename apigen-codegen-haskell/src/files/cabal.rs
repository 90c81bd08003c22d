//! Cabal package description template.

use apigen_codegen::{
    builder::CodeBuilder,
    render::{RenderContext, RenderError, Rendered, Scope, Template},
};

use super::{has_types, module_name};
use crate::escape::comment_text;

/// Fallback when the document version is not a dotted number.
const DEFAULT_VERSION: &str = "0.1.0";

/// Library dependencies of the generated code.
const BUILD_DEPENDS: &[&str] = &[
    "aeson",
    "base >=4.14 && <5",
    "containers",
    "http-api-data",
    "servant",
    "servant-server",
    "text",
    "time",
    "uuid",
];

/// The `<package>.cabal` file.
pub struct CabalFile;

impl Template for CabalFile {
    fn name(&self) -> &'static str {
        "package.cabal"
    }

    fn is_supporting(&self) -> bool {
        true
    }

    fn path(&self, _scope: &Scope, ctx: &RenderContext<'_>) -> String {
        format!("{}.cabal", cabal_package_name(&ctx.package_name()))
    }

    fn render(&self, _scope: &Scope, ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
        let module = module_name(ctx);
        let meta = ctx.meta();

        let mut builder = CodeBuilder::haskell();
        builder
            .push_line("cabal-version:      2.4")
            .push_line(&format!(
                "name:               {}",
                cabal_package_name(&ctx.package_name())
            ))
            .push_line(&format!("version:            {}", cabal_version(&meta.version)))
            .push_line(&format!(
                "synopsis:           Servant API for {}",
                comment_text(&meta.title)
            ))
            .push_line("build-type:         Simple")
            .push_blank()
            .push_line("library")
            .push_indent()
            .push_line("hs-source-dirs:   lib")
            .push_line("exposed-modules:")
            .push_indent()
            .push_line(&format!("{module}.API"));
        if has_types(ctx) {
            builder.push_line(&format!("{module}.Types"));
        }
        builder.push_dedent().push_line("build-depends:").push_indent();
        for dependency in BUILD_DEPENDS {
            builder.push_line(&format!(", {dependency}"));
        }
        builder
            .push_dedent()
            .push_line("default-language: Haskell2010")
            .push_line("ghc-options:      -Wall");

        Ok(Rendered::File(builder.build()))
    }
}

/// A valid cabal package name: alphanumeric components joined by `-`, none
/// of them purely numeric.
pub fn cabal_package_name(package: &str) -> String {
    let components: Vec<String> = package
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.chars().all(|c| c.is_ascii_digit()) {
                format!("v{part}")
            } else {
                part.to_string()
            }
        })
        .collect();

    if components.is_empty() {
        "api".to_string()
    } else {
        components.join("-")
    }
}

/// The leading dotted number of a version string (`v1.2.0-beta` -> `1.2.0`).
pub fn cabal_version(version: &str) -> String {
    let numeric: String = version
        .trim()
        .trim_start_matches(['v', 'V'])
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let parts: Vec<&str> = numeric.split('.').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        DEFAULT_VERSION.to_string()
    } else {
        parts.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cabal_package_name() {
        assert_eq!(cabal_package_name("pet-store"), "pet-store");
        assert_eq!(cabal_package_name("api_2"), "api-v2");
        assert_eq!(cabal_package_name("--"), "api");
    }

    #[test]
    fn test_cabal_version() {
        assert_eq!(cabal_version("1.0.0"), "1.0.0");
        assert_eq!(cabal_version("v2.1-beta"), "2.1");
        assert_eq!(cabal_version("1..2."), "1.2");
        assert_eq!(cabal_version("latest"), DEFAULT_VERSION);
    }
}
