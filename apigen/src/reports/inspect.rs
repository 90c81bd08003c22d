//! Inspect command report data structures.

use super::output::{Output, Report};

/// Report data from inspecting a document's IR.
#[derive(Debug)]
pub struct InspectReport {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Normalized routes in declaration order.
    pub routes: Vec<RouteLine>,
    /// Models in declaration order.
    pub models: Vec<ModelLine>,
}

/// One operation as it will be routed.
#[derive(Debug)]
pub struct RouteLine {
    pub method: String,
    pub route: String,
    pub operation_id: String,
    pub deprecated: bool,
}

/// One model with a short description of its shape.
#[derive(Debug)]
pub struct ModelLine {
    pub name: String,
    pub shape: String,
}

impl Report for InspectReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("{} v{}", self.title, self.version));
        if let Some(description) = &self.description {
            out.preformatted(description);
        }
        out.newline();

        out.section(&format!("Routes ({})", self.routes.len()));
        let width = self
            .routes
            .iter()
            .map(|r| r.method.len() + 1 + r.route.len())
            .max()
            .unwrap_or(0);
        for route in &self.routes {
            let target = format!("{} {}", route.method, route.route);
            let mut line = format!("{target:<width$}  {}", route.operation_id);
            if route.deprecated {
                line.push_str(" (deprecated)");
            }
            out.list_item(&line);
        }

        if !self.models.is_empty() {
            out.newline();
            out.section(&format!("Models ({})", self.models.len()));
            for model in &self.models {
                out.list_item(&format!("{}: {}", model.name, model.shape));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_render_aligns_routes() {
        let report = InspectReport {
            title: "Health".into(),
            version: "1.0".into(),
            description: None,
            routes: vec![
                RouteLine {
                    method: "GET".into(),
                    route: "/".into(),
                    operation_id: "getRoot".into(),
                    deprecated: false,
                },
                RouteLine {
                    method: "DELETE".into(),
                    route: "/users/{id}".into(),
                    operation_id: "deleteUser".into(),
                    deprecated: true,
                },
            ],
            models: vec![ModelLine {
                name: "User".into(),
                shape: "record (2 fields)".into(),
            }],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "# Health v1.0",
                "",
                "Routes (2):",
                "- GET /               getRoot",
                "- DELETE /users/{id}  deleteUser (deprecated)",
                "",
                "Models (1):",
                "- User: record (2 fields)",
            ]
        );
    }
}
