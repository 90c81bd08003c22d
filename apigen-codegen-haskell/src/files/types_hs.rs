//! Types.hs template: one Haskell type per model and inline enum.

use apigen_codegen::{
    builder::CodeBuilder,
    language::{IdentifierContext, TypeMapper},
    mapper::{Identifier, NameScope},
    render::{RenderContext, RenderError, RenderNote, Rendered, Scope, Template},
};
use apigen_core::to_pascal_case;
use apigen_ir::{Discriminator, Field, Model, ModelKind, PrimitiveKind, TypeRef};

use super::{has_types, header_comment, module_name};
use crate::{
    escape::string_literal,
    naming::{GENERATED_NAMES, lower_first},
    type_mapper::{HaskellTypeMapper, Imports},
};

/// The `Types.hs` module. Elided when the API declares no types.
pub struct TypesHs;

impl Template for TypesHs {
    fn name(&self) -> &'static str {
        "Types.hs"
    }

    fn path(&self, _scope: &Scope, ctx: &RenderContext<'_>) -> String {
        format!("lib/{}/Types.hs", module_name(ctx))
    }

    fn render(&self, _scope: &Scope, ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
        if !has_types(ctx) {
            return Ok(Rendered::Elided);
        }
        TypesModule::new(ctx).render()
    }
}

struct TypesModule<'c, 'a> {
    ctx: &'c RenderContext<'a>,
    mapper: HaskellTypeMapper,
    imports: Imports,
    /// Data constructors, seeded with every type name.
    constructors: NameScope,
    /// Top-level values: record fields and JSON helpers.
    values: NameScope,
    /// Renames made in either scope.
    notes: Vec<RenderNote>,
    uses_alternative: bool,
}

impl<'c, 'a> TypesModule<'c, 'a> {
    fn new(ctx: &'c RenderContext<'a>) -> Self {
        let mut constructors = NameScope::new();
        for model in ctx.models() {
            constructors.claim(&model.name, model.name.clone(), |_| false);
        }
        for inline in ctx.inline_enums() {
            constructors.claim(inline.name, inline.name.to_string(), |_| false);
        }

        let mut imports = Imports::new();
        imports.add("Data.Aeson", "FromJSON (..)");
        imports.add("Data.Aeson", "ToJSON (..)");
        imports.add("GHC.Generics", "Generic");

        Self {
            ctx,
            mapper: HaskellTypeMapper,
            imports,
            constructors,
            values: NameScope::new(),
            notes: Vec::new(),
            uses_alternative: false,
        }
    }

    fn value_name(&mut self, raw: &str, preferred: String) -> String {
        let naming = self.ctx.config.naming;
        let identifier = self.values.claim_fresh(raw, preferred, |name| {
            naming.is_reserved(name) || GENERATED_NAMES.contains(&name)
        });
        self.record(identifier)
    }

    fn constructor_name(&mut self, raw: &str, preferred: String) -> String {
        let identifier = self.constructors.claim_fresh(raw, preferred, |_| false);
        self.record(identifier)
    }

    fn record(&mut self, identifier: Identifier) -> String {
        if let Some(collision) = identifier.collision {
            self.notes.push(collision.into());
        }
        identifier.name
    }

    fn render(mut self) -> Result<Rendered, RenderError> {
        let ctx = self.ctx;
        let module = module_name(ctx);

        let mut body = CodeBuilder::haskell();
        let mut exports = Vec::new();
        for model in ctx.models() {
            body.push_blank();
            self.render_model(&mut body, model)?;
            exports.push(format!("{} (..)", model.name));
        }
        for inline in ctx.inline_enums() {
            body.push_blank();
            self.render_enum(&mut body, inline.name, None, inline.values);
            exports.push(format!("{} (..)", inline.name));
        }

        if self.uses_alternative {
            self.imports.add("Control.Applicative", "(<|>)");
        }

        let mut builder = CodeBuilder::haskell();
        for pragma in ["DeriveGeneric", "OverloadedStrings"] {
            builder.push_line(&format!("{{-# LANGUAGE {pragma} #-}}"));
        }
        builder.push_blank();
        for line in header_comment(self.ctx, "Types") {
            builder.push_line(&line);
        }
        builder.push_line(&format!("module {module}.Types")).push_indent();
        for (i, export) in exports.iter().enumerate() {
            let lead = if i == 0 { "(" } else { "," };
            builder.push_line(&format!("{lead} {export}"));
        }
        builder.push_line(") where").push_dedent().push_blank();

        for line in self.imports.lines() {
            builder.push_line(&line);
        }
        builder.push_line("import qualified Data.Aeson as Aeson");
        builder.push_raw(&body.build());

        Ok(Rendered::file(builder.build(), self.notes))
    }

    fn render_model(&mut self, b: &mut CodeBuilder, model: &Model) -> Result<(), RenderError> {
        if let Some(description) = &model.description {
            b.push_comment("-- |", "--", description);
        }
        match &model.kind {
            ModelKind::Record(fields) => self.render_record(b, model, fields),
            ModelKind::Enum(values) => {
                self.render_enum(b, &model.name, Some(model.raw_name.as_str()), values);
                Ok(())
            }
            ModelKind::Union(variants) => {
                self.render_union(b, model, variants, model.discriminator.as_ref())
            }
            ModelKind::Alias(ty) => self.render_newtype(b, model, ty),
        }
    }

    fn render_record(
        &mut self,
        b: &mut CodeBuilder,
        model: &Model,
        fields: &[Field],
    ) -> Result<(), RenderError> {
        let name = &model.name;
        if fields.is_empty() {
            b.push_line(&format!("data {name} = {name}"))
                .push_indent()
                .push_line("deriving (Show, Eq, Generic)")
                .push_dedent()
                .push_blank()
                .push_line(&format!("instance FromJSON {name} where"))
                .push_indent()
                .push_line(&format!(
                    "parseJSON = Aeson.withObject {} (\\_ -> pure {name})",
                    string_literal(name)
                ))
                .push_dedent()
                .push_blank()
                .push_line(&format!("instance ToJSON {name} where"))
                .push_indent()
                .push_line("toJSON _ = Aeson.object []")
                .push_dedent();
            return Ok(());
        }

        let prefix = lower_first(name);
        let mut labels = Vec::new();
        b.push_line(&format!("data {name} = {name}")).push_indent();
        for (i, field) in fields.iter().enumerate() {
            for referenced in field.ty.object_refs() {
                self.ctx
                    .resolve_model(referenced, &format!("{name}.{}", field.raw_name))?;
            }
            self.mapper.collect_imports(&field.ty, &mut self.imports);

            let field_name = self.value_name(
                &format!("{name}.{}", field.raw_name),
                format!("{prefix}{}", to_pascal_case(&field.name)),
            );
            let lead = if i == 0 { "{" } else { "," };
            b.push_line(&format!(
                "{lead} {field_name} :: {}",
                self.mapper.map_type(&field.ty)
            ));
            if let Some(description) = &field.description {
                b.push_indent().push_comment("-- ^", "--", description).push_dedent();
            }
            labels.push((field_name, field.raw_name.as_str()));
        }
        b.push_line("}")
            .push_line("deriving (Show, Eq, Generic)")
            .push_dedent()
            .push_blank();

        let options = self.value_name(&format!("{name}#options"), format!("{prefix}JsonOptions"));
        let label = self.value_name(&format!("{name}#label"), format!("{prefix}JsonField"));

        b.push_line(&format!("instance FromJSON {name} where"))
            .push_indent()
            .push_line(&format!("parseJSON = Aeson.genericParseJSON {options}"))
            .push_dedent()
            .push_blank()
            .push_line(&format!("instance ToJSON {name} where"))
            .push_indent()
            .push_line(&format!("toJSON = Aeson.genericToJSON {options}"))
            .push_dedent()
            .push_blank()
            .push_line(&format!("{options} :: Aeson.Options"))
            .push_line(&format!("{options} ="))
            .push_indent()
            .push_line("Aeson.defaultOptions")
            .push_indent()
            .push_line(&format!("{{ Aeson.fieldLabelModifier = {label}"))
            .push_line(", Aeson.omitNothingFields = True")
            .push_line("}")
            .push_dedent()
            .push_dedent()
            .push_blank()
            .push_line(&format!("{label} :: String -> String"))
            .push_line(&format!("{label} label = case label of"))
            .push_indent();
        for (field_name, raw) in labels {
            b.push_line(&format!(
                "{} -> {}",
                string_literal(&field_name),
                string_literal(raw)
            ));
        }
        b.push_line("other -> other").push_dedent();
        Ok(())
    }

    /// An enum as a sum of nullary constructors with text-based JSON and
    /// URL piece instances.
    fn render_enum(
        &mut self,
        b: &mut CodeBuilder,
        name: &str,
        raw_name: Option<&str>,
        values: &[String],
    ) {
        if values.is_empty() {
            self.render_newtype_over(b, name, &TypeRef::string());
            return;
        }

        self.imports.add("Web.HttpApiData", "FromHttpApiData (..)");
        self.imports.add("Web.HttpApiData", "ToHttpApiData (..)");

        let naming = self.ctx.config.naming;
        let constructors: Vec<(String, &str)> = values
            .iter()
            .map(|value| {
                let variant = naming.base_identifier(value, IdentifierContext::EnumVariant);
                let constructor =
                    self.constructor_name(&format!("{name}.{value}"), format!("{name}{variant}"));
                (constructor, value.as_str())
            })
            .collect();

        b.push_line(&format!("data {name}")).push_indent();
        for (i, (constructor, _)) in constructors.iter().enumerate() {
            let lead = if i == 0 { "=" } else { "|" };
            b.push_line(&format!("{lead} {constructor}"));
        }
        b.push_line("deriving (Show, Eq, Ord, Enum, Bounded, Generic)")
            .push_dedent()
            .push_blank();

        let label = string_literal(raw_name.unwrap_or(name));
        b.push_line(&format!("instance ToHttpApiData {name} where"))
            .push_indent()
            .push_line("toUrlPiece value = case value of")
            .push_indent();
        for (constructor, value) in &constructors {
            b.push_line(&format!("{constructor} -> {}", string_literal(value)));
        }
        b.push_dedent()
            .push_dedent()
            .push_blank()
            .push_line(&format!("instance FromHttpApiData {name} where"))
            .push_indent()
            .push_line("parseUrlPiece text = case text of")
            .push_indent();
        for (constructor, value) in &constructors {
            b.push_line(&format!("{} -> Right {constructor}", string_literal(value)));
        }
        b.push_line(&format!(
            "other -> Left (\"unknown \" <> {label} <> \": \" <> other)"
        ))
        .push_dedent()
        .push_dedent()
        .push_blank()
        .push_line(&format!("instance ToJSON {name} where"))
        .push_indent()
        .push_line("toJSON = Aeson.String . toUrlPiece")
        .push_dedent()
        .push_blank()
        .push_line(&format!("instance FromJSON {name} where"))
        .push_indent()
        .push_line(&format!(
            "parseJSON = Aeson.withText {label} (either (fail . show) pure . parseUrlPiece)"
        ))
        .push_dedent();
    }

    /// A union as a sum type with one constructor per variant model.
    fn render_union(
        &mut self,
        b: &mut CodeBuilder,
        model: &Model,
        variants: &[String],
        discriminator: Option<&Discriminator>,
    ) -> Result<(), RenderError> {
        let name = &model.name;
        if variants.is_empty() {
            return self.render_newtype(b, model, &TypeRef::any());
        }
        for variant in variants {
            self.ctx.resolve_model(variant, name)?;
        }

        let constructors: Vec<(String, &str)> = variants
            .iter()
            .map(|variant| {
                let constructor = self
                    .constructor_name(&format!("{name}.{variant}"), format!("{name}{variant}"));
                (constructor, variant.as_str())
            })
            .collect();

        b.push_line(&format!("data {name}")).push_indent();
        for (i, (constructor, variant)) in constructors.iter().enumerate() {
            let lead = if i == 0 { "=" } else { "|" };
            b.push_line(&format!("{lead} {constructor} {variant}"));
        }
        b.push_line("deriving (Show, Eq, Generic)")
            .push_dedent()
            .push_blank()
            .push_line(&format!("instance ToJSON {name} where"))
            .push_indent()
            .push_line("toJSON value = case value of")
            .push_indent();
        for (constructor, _) in &constructors {
            b.push_line(&format!("{constructor} inner -> toJSON inner"));
        }
        b.push_dedent()
            .push_dedent()
            .push_blank()
            .push_line(&format!("instance FromJSON {name} where"))
            .push_indent();

        match discriminator {
            Some(discriminator) => {
                self.imports.add("Data.Text", "Text");
                b.push_line(&format!(
                    "parseJSON = Aeson.withObject {} $ \\object -> do",
                    string_literal(name)
                ))
                .push_indent()
                .push_line(&format!(
                    "tag <- object Aeson..: {}",
                    string_literal(&discriminator.property)
                ))
                .push_line("case (tag :: Text) of")
                .push_indent();
                for (value, target) in &discriminator.mapping {
                    let Some((constructor, _)) =
                        constructors.iter().find(|(_, variant)| *variant == target.as_str())
                    else {
                        continue;
                    };
                    b.push_line(&format!(
                        "{} -> {constructor} <$> parseJSON (Aeson.Object object)",
                        string_literal(value)
                    ));
                }
                b.push_line(&format!(
                    "other -> fail (\"unknown {} tag: \" <> show other)",
                    name
                ))
                .push_dedent()
                .push_dedent();
            }
            None => {
                self.uses_alternative = true;
                b.push_line("parseJSON json =").push_indent();
                for (i, (constructor, _)) in constructors.iter().enumerate() {
                    let alternative = format!("({constructor} <$> parseJSON json)");
                    if i == 0 {
                        b.push_line(&alternative);
                    } else {
                        b.push_line(&format!("  <|> {alternative}"));
                    }
                }
                b.push_dedent();
            }
        }
        b.push_dedent();
        Ok(())
    }

    fn render_newtype(
        &mut self,
        b: &mut CodeBuilder,
        model: &Model,
        ty: &TypeRef,
    ) -> Result<(), RenderError> {
        for referenced in ty.object_refs() {
            self.ctx.resolve_model(referenced, &model.name)?;
        }
        self.render_newtype_over(b, &model.name, ty);
        Ok(())
    }

    /// A newtype whose JSON (and URL piece, for scalars) form is the
    /// wrapped value's.
    fn render_newtype_over(&mut self, b: &mut CodeBuilder, name: &str, ty: &TypeRef) {
        self.mapper.collect_imports(ty, &mut self.imports);
        b.push_line(&format!(
            "newtype {name} = {name} {}",
            self.mapper.map_atom(ty)
        ))
        .push_indent()
        .push_line("deriving (Show, Eq, Generic)")
        .push_dedent()
        .push_blank()
        .push_line(&format!("instance FromJSON {name} where"))
        .push_indent()
        .push_line(&format!("parseJSON json = {name} <$> parseJSON json"))
        .push_dedent()
        .push_blank()
        .push_line(&format!("instance ToJSON {name} where"))
        .push_indent()
        .push_line(&format!("toJSON ({name} inner) = toJSON inner"))
        .push_dedent();

        let scalar = match ty {
            TypeRef::Primitive(kind) => *kind != PrimitiveKind::Any,
            TypeRef::Enum { .. } => true,
            _ => false,
        };
        if scalar {
            self.imports.add("Web.HttpApiData", "FromHttpApiData (..)");
            self.imports.add("Web.HttpApiData", "ToHttpApiData (..)");
            b.push_blank()
                .push_line(&format!("instance FromHttpApiData {name} where"))
                .push_indent()
                .push_line(&format!("parseUrlPiece piece = {name} <$> parseUrlPiece piece"))
                .push_dedent()
                .push_blank()
                .push_line(&format!("instance ToHttpApiData {name} where"))
                .push_indent()
                .push_line(&format!("toUrlPiece ({name} inner) = toUrlPiece inner"))
                .push_dedent();
        }
    }
}
