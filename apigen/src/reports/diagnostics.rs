//! Diagnostic lines shared by the reports.

use apigen_codegen::pipeline::{Diagnostic, Severity};

use super::output::Output;

/// Render diagnostics: errors and warnings to the error stream, notices as
/// plain text.
pub fn render_diagnostics(diagnostics: &[Diagnostic], out: &mut dyn Output) {
    for diagnostic in diagnostics {
        let mut message = format!("[{}] {}", diagnostic.kind, diagnostic.message);
        if let Some(location) = &diagnostic.location {
            message.push_str(&format!("\n  --> {location}"));
        }
        match diagnostic.severity {
            Severity::Error => out.error(&message),
            Severity::Warning => out.warning(&message),
            Severity::Info => out.preformatted(&format!("info: {message}")),
        }
    }
}
