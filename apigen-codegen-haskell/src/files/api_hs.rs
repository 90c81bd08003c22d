//! API.hs template: Servant route types, the backend record and the server.

use apigen_codegen::{
    builder::CodeBuilder,
    language::{IdentifierContext, TypeMapper},
    mapper::NameScope,
    render::{RenderContext, RenderError, RenderNote, Rendered, Scope, Template},
};
use apigen_ir::{ModelKind, Operation, ParamLocation, PathSegment, PrimitiveKind, TypeRef};

use super::{has_types, header_comment, module_name};
use crate::{
    escape::{comment_text, string_literal},
    type_mapper::{HaskellTypeMapper, Imports},
};

/// Route combinator separator.
const ROUTE_SEPARATOR: &str = " :> ";
/// Alternative separator.
const ALT: &str = ":<|>";

/// The `API.hs` module.
pub struct ApiHs;

impl Template for ApiHs {
    fn name(&self) -> &'static str {
        "API.hs"
    }

    fn path(&self, _scope: &Scope, ctx: &RenderContext<'_>) -> String {
        format!("lib/{}/API.hs", module_name(ctx))
    }

    fn render(&self, _scope: &Scope, ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
        ApiModule::new(ctx).render()
    }
}

/// One operation as a Servant route plus its handler type.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoint {
    route: String,
    handler: String,
}

/// Operations of one tag under their route type name.
struct Group<'a> {
    type_name: String,
    operations: Vec<(&'a Operation, Endpoint)>,
}

struct ApiModule<'c, 'a> {
    ctx: &'c RenderContext<'a>,
    mapper: HaskellTypeMapper,
    imports: Imports,
    /// Renamed group types and parameter types rendered as text.
    notes: Vec<RenderNote>,
}

impl<'c, 'a> ApiModule<'c, 'a> {
    fn new(ctx: &'c RenderContext<'a>) -> Self {
        let mut imports = Imports::new();
        imports.add("Data.Kind", "Type");
        Self {
            ctx,
            mapper: HaskellTypeMapper,
            imports,
            notes: Vec::new(),
        }
    }

    fn render(mut self) -> Result<Rendered, RenderError> {
        let module = module_name(self.ctx);
        let backend = self.backend_name(&module);
        let groups = self.groups()?;

        let mut builder = CodeBuilder::haskell();
        for pragma in ["DataKinds", "KindSignatures", "RecordWildCards", "TypeOperators"] {
            builder.push_line(&format!("{{-# LANGUAGE {pragma} #-}}"));
        }
        builder.push_blank();
        for line in header_comment(self.ctx, "Servant API") {
            builder.push_line(&line);
        }

        builder.push_line(&format!("module {module}.API")).push_indent();
        let mut exports = vec!["API".to_string(), "api".to_string()];
        exports.extend(groups.iter().map(|g| g.type_name.clone()));
        exports.push(format!("{backend} (..)"));
        exports.push("serverFromBackend".to_string());
        for (i, export) in exports.iter().enumerate() {
            let lead = if i == 0 { "(" } else { "," };
            builder.push_line(&format!("{lead} {export}"));
        }
        builder.push_line(") where").push_dedent().push_blank();

        for line in self.imports.lines() {
            builder.push_line(&line);
        }
        builder.push_line("import Servant");
        if has_types(self.ctx) {
            builder.push_blank().push_line(&format!("import {module}.Types"));
        }

        for group in &groups {
            builder.push_blank();
            render_group_type(&mut builder, group);
        }

        builder.push_blank().push_line("-- | The complete API.");
        if groups.is_empty() {
            builder.push_line("type API = EmptyAPI");
        } else {
            builder.push_line("type API =").push_indent();
            for (i, group) in groups.iter().enumerate() {
                if i == 0 {
                    builder.push_line(&group.type_name);
                } else {
                    builder.push_line(&format!("{ALT} {}", group.type_name));
                }
            }
            builder.push_dedent();
        }

        builder
            .push_blank()
            .push_line("api :: Proxy API")
            .push_line("api = Proxy")
            .push_blank();

        render_backend(&mut builder, &backend, &groups);
        builder.push_blank();
        render_server(&mut builder, &backend, &groups);

        Ok(Rendered::file(builder.build(), self.notes))
    }

    /// `<Module>Backend`, kept clear of model names.
    fn backend_name(&self, module: &str) -> String {
        let mut name = format!("{module}Backend");
        let inline = self.ctx.inline_enums();
        while self.ctx.ir.models.contains(&name) || inline.iter().any(|e| e.name == name) {
            name.push('_');
        }
        name
    }

    fn groups(&mut self) -> Result<Vec<Group<'a>>, RenderError> {
        let naming = self.ctx.config.naming;
        let mut scope = NameScope::new();
        for model in self.ctx.models() {
            scope.claim(&model.name, model.name.clone(), |_| false);
        }
        for inline in self.ctx.inline_enums() {
            scope.claim(inline.name, inline.name.to_string(), |_| false);
        }

        let mut groups = Vec::new();
        for tag_group in self.ctx.tag_groups() {
            let base = naming.base_identifier(tag_group.tag, IdentifierContext::Type);
            let identifier =
                scope.claim_fresh(tag_group.tag, format!("{base}API"), |name| name == "API");
            if let Some(collision) = identifier.collision {
                self.notes.push(collision.into());
            }
            let type_name = identifier.name;

            let mut operations = Vec::new();
            for op in tag_group.operations {
                operations.push((op, self.endpoint(op)?));
            }
            groups.push(Group {
                type_name,
                operations,
            });
        }
        Ok(groups)
    }

    fn endpoint(&mut self, op: &Operation) -> Result<Endpoint, RenderError> {
        self.check_references(op)?;

        let mut tokens: Vec<String> = Vec::new();
        let mut args: Vec<String> = Vec::new();

        for segment in op.path.segments() {
            match segment {
                PathSegment::Literal(_) => tokens.extend(
                    segment
                        .literal_components()
                        .into_iter()
                        .map(string_literal),
                ),
                PathSegment::Parameter { name, ty } => {
                    let ty = self.wire_type(ty, || {
                        format!("path parameter '{name}' of operation '{}'", op.id)
                    });
                    tokens.push(format!(
                        "Capture {} {}",
                        string_literal(name),
                        self.mapper.map_atom(&ty)
                    ));
                    args.push(self.mapper.map_type(&ty));
                }
                PathSegment::Root => {
                    let marker = &self.ctx.config.root_marker;
                    if !marker.is_empty() {
                        tokens.push(marker.clone());
                    }
                }
            }
        }

        for param in op.parameters_in(ParamLocation::Query) {
            let name = string_literal(&param.raw_name);
            let subject = || format!("query parameter '{}' of operation '{}'", param.raw_name, op.id);
            if let TypeRef::Array(item) = param.ty.without_optional() {
                let item = self.wire_type(item, subject);
                tokens.push(format!("QueryParams {name} {}", self.mapper.map_atom(&item)));
                args.push(format!("[{}]", self.mapper.map_type(&item)));
            } else {
                let ty = self.wire_type(&param.ty, subject);
                self.optional_combinator(&mut tokens, &mut args, "QueryParam", &name, &ty, param.required);
            }
        }

        for param in op.parameters_in(ParamLocation::Header) {
            let name = string_literal(&param.raw_name);
            let ty = self.wire_type(&param.ty, || {
                format!("header '{}' of operation '{}'", param.raw_name, op.id)
            });
            self.optional_combinator(&mut tokens, &mut args, "Header", &name, &ty, param.required);
        }

        if op.parameters_in(ParamLocation::Cookie).next().is_some() {
            self.imports.add("Data.Text", "Text");
            tokens.push("Header \"Cookie\" Text".to_string());
            args.push("Maybe Text".to_string());
        }

        if let Some(body) = &op.request_body {
            let ty = body.ty.without_optional();
            self.mapper.collect_imports(ty, &mut self.imports);
            let atom = self.mapper.map_atom(ty);
            if body.required {
                tokens.push(format!("ReqBody '[JSON] {atom}"));
                args.push(self.mapper.map_type(ty));
            } else {
                tokens.push(format!("ReqBody' '[Optional, Strict] '[JSON] {atom}"));
                args.push(format!("Maybe {atom}"));
            }
        }

        let result = self.result_type(op);
        tokens.push(format!(
            "Verb '{} {} '[JSON] {result}",
            op.method.as_str(),
            self.status(op)
        ));
        args.push(format!("m {result}"));

        Ok(Endpoint {
            route: tokens.join(ROUTE_SEPARATOR),
            handler: args.join(" -> "),
        })
    }

    /// `QueryParam`/`Header` and their required variants.
    fn optional_combinator(
        &self,
        tokens: &mut Vec<String>,
        args: &mut Vec<String>,
        combinator: &str,
        name: &str,
        ty: &TypeRef,
        required: bool,
    ) {
        let atom = self.mapper.map_atom(ty);
        if required {
            tokens.push(format!("{combinator}' '[Required, Strict] {name} {atom}"));
            args.push(self.mapper.map_type(ty));
        } else {
            tokens.push(format!("{combinator} {name} {atom}"));
            args.push(format!("Maybe {atom}"));
        }
    }

    /// The type a URL piece or header is parsed as. Free-form values are
    /// taken as text, and so are types without `FromHttpApiData` and
    /// `ToHttpApiData` instances, with a note naming `subject`.
    fn wire_type(&mut self, ty: &TypeRef, subject: impl FnOnce() -> String) -> TypeRef {
        let inner = ty.without_optional();
        let wire = if inner.is_any() {
            TypeRef::string()
        } else if self.has_url_piece(inner) {
            inner.clone()
        } else {
            self.notes.push(RenderNote::Fallback(format!(
                "{} has type {} with no URL encoding; rendered as Text",
                subject(),
                self.mapper.map_type(inner)
            )));
            TypeRef::string()
        };
        self.mapper.collect_imports(&wire, &mut self.imports);
        wire
    }

    /// Whether the generated code has HTTP API data instances for `ty`:
    /// primitives, enums and newtypes over either.
    fn has_url_piece(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Primitive(_) | TypeRef::Enum { .. } => true,
            TypeRef::ObjectRef(name) => match self.ctx.ir.models.get(name).map(|m| &m.kind) {
                Some(ModelKind::Enum(_) | ModelKind::Alias(TypeRef::Enum { .. })) => true,
                Some(ModelKind::Alias(TypeRef::Primitive(kind))) => *kind != PrimitiveKind::Any,
                _ => false,
            },
            TypeRef::Array(_) | TypeRef::Map(_) | TypeRef::Optional(_) => false,
        }
    }

    fn status(&self, op: &Operation) -> u16 {
        op.success_response()
            .and_then(|r| r.status.code())
            .unwrap_or_else(|| op.method.default_status())
    }

    /// Response body of the success response, wrapped in `Headers` when it
    /// declares response headers.
    fn result_type(&mut self, op: &Operation) -> String {
        let Some(response) = op.success_response() else {
            return "NoContent".to_string();
        };

        let body = match &response.ty {
            Some(ty) => {
                self.mapper.collect_imports(ty, &mut self.imports);
                self.mapper.map_atom(ty)
            }
            None => "NoContent".to_string(),
        };
        if response.headers.is_empty() {
            return body;
        }

        let headers: Vec<String> = response
            .headers
            .iter()
            .map(|header| {
                let ty = self.wire_type(&header.ty, || {
                    format!("response header '{}' of operation '{}'", header.name, op.id)
                });
                format!(
                    "Header {} {}",
                    string_literal(&header.name),
                    self.mapper.map_atom(&ty)
                )
            })
            .collect();
        format!("(Headers '[{}] {body})", headers.join(", "))
    }

    fn check_references(&self, op: &Operation) -> Result<(), RenderError> {
        let mut types: Vec<&TypeRef> = op.parameters.iter().map(|p| &p.ty).collect();
        types.extend(op.request_body.iter().map(|b| &b.ty));
        for response in &op.responses {
            types.extend(response.ty.iter());
        }
        for name in types.into_iter().flat_map(TypeRef::object_refs) {
            self.ctx.resolve_model(name, &op.id)?;
        }
        Ok(())
    }
}

fn render_group_type(builder: &mut CodeBuilder, group: &Group<'_>) {
    let tag = group
        .operations
        .first()
        .and_then(|(op, _)| op.primary_tag())
        .unwrap_or(apigen_ir::DEFAULT_TAG);
    builder
        .push_line(&format!("-- | Operations tagged @{}@.", comment_text(tag)))
        .push_line(&format!("type {} =", group.type_name))
        .push_indent();

    for (i, (op, endpoint)) in group.operations.iter().enumerate() {
        builder.push_line(&format!(
            "-- {}: {} {}",
            op.id,
            op.method,
            comment_text(&op.raw_path)
        ));
        if i == 0 {
            builder.push_line(&endpoint.route);
        } else {
            builder.push_line(&format!("{ALT} {}", endpoint.route));
        }
    }
    builder.push_dedent();
}

fn render_backend(builder: &mut CodeBuilder, backend: &str, groups: &[Group<'_>]) {
    builder.push_line("-- | Handlers for every operation, running in @m@.");
    let operations: Vec<&(&Operation, Endpoint)> =
        groups.iter().flat_map(|g| g.operations.iter()).collect();

    if operations.is_empty() {
        builder.push_line(&format!("data {backend} (m :: Type -> Type) = {backend}"));
        return;
    }

    builder
        .push_line(&format!("data {backend} (m :: Type -> Type) = {backend}"))
        .push_indent();
    for (i, (op, endpoint)) in operations.iter().enumerate() {
        let lead = if i == 0 { "{" } else { "," };
        match handler_doc(op) {
            Some(doc) => {
                builder
                    .push_line(&format!("{lead} -- | {doc}"))
                    .push_line(&format!("  {} :: {}", op.id, endpoint.handler));
            }
            None => {
                builder.push_line(&format!("{lead} {} :: {}", op.id, endpoint.handler));
            }
        }
    }
    builder.push_line("}").push_dedent();
}

fn handler_doc(op: &Operation) -> Option<String> {
    let text = op.summary.as_deref().or(op.description.as_deref())?;
    let text = comment_text(text);
    if text.is_empty() {
        return None;
    }
    Some(if op.deprecated {
        format!("Deprecated. {text}")
    } else {
        text
    })
}

fn render_server(builder: &mut CodeBuilder, backend: &str, groups: &[Group<'_>]) {
    builder
        .push_line("-- | Serve the API from a backend.")
        .push_line(&format!("serverFromBackend :: {backend} Handler -> Server API"));

    if groups.is_empty() {
        builder.push_line("serverFromBackend _ = emptyServer");
        return;
    }

    builder
        .push_line(&format!("serverFromBackend {backend} {{..}} ="))
        .push_indent();
    for (i, group) in groups.iter().enumerate() {
        let handlers: Vec<&str> = group
            .operations
            .iter()
            .map(|(op, _)| op.id.as_str())
            .collect();
        let joined = handlers.join(&format!(" {ALT} "));
        let server = if handlers.len() > 1 && groups.len() > 1 {
            format!("({joined})")
        } else {
            joined
        };
        if i == 0 {
            builder.push_line(&server);
        } else {
            builder.push_line(&format!("{ALT} {server}"));
        }
    }
    builder.push_dedent();
}
