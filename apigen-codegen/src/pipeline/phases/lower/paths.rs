//! Route parsing and placeholder binding.

use apigen_ir::{PATH_DELIMITER, ParamLocation, Parameter, PathSegment, PathTemplate};
use apigen_spec::RawOperation;

use super::Lowerer;
use crate::pipeline::{BuildError, DiagnosticKind};

impl<'a> Lowerer<'a> {
    /// Parse a raw route into a normalized path template.
    ///
    /// Each `/`-separated component is either a literal or exactly one
    /// placeholder. Placeholders bind to a declared path parameter with the
    /// same raw name; an unbound placeholder aborts the run. Components that
    /// mix text and a placeholder stay literal and are reported.
    pub(super) fn lower_path(
        &mut self,
        raw: &RawOperation<'a>,
        parameters: &[Parameter],
    ) -> Result<PathTemplate, BuildError> {
        let config = self.config;
        let delimiter = &config.path_param_delimiter;
        let mut segments = Vec::new();
        let mut mixed = Vec::new();

        for component in raw.path.split(PATH_DELIMITER) {
            if let Some(name) = delimiter.placeholder(component) {
                let param = parameters
                    .iter()
                    .find(|p| p.location == ParamLocation::Path && p.raw_name == name)
                    .ok_or_else(|| BuildError::UnboundPathParameter {
                        method: raw.method.as_str().to_string(),
                        path: raw.path.to_string(),
                        name: name.to_string(),
                    })?;
                segments.push(PathSegment::parameter(
                    name,
                    param.ty.without_optional().clone(),
                ));
            } else {
                if delimiter.mentions_placeholder(component) {
                    mixed.push(component);
                }
                segments.push(PathSegment::literal(component));
            }
        }

        let location = format!("paths.{}.{}", raw.path, raw.method.key());
        for component in mixed {
            self.warn(
                DiagnosticKind::UnsupportedPathSegment,
                format!("path component '{component}' mixes text and a placeholder; kept as literal"),
                &location,
            );
        }

        Ok(PathTemplate::normalize(segments))
    }
}
