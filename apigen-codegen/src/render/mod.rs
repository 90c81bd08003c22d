//! Template rendering.
//!
//! A target's [`TemplateSet`] is bound to a read-only [`RenderContext`]
//! over the IR. Each template declares the scopes it renders (the whole API,
//! one tag group, one model) and produces one file per scope:
//!
//! ```text
//! ApiIR + TargetConfig → RenderContext → [plan] → (path, Rendered) per file
//! ```
//!
//! Rendering is pure; writing the files is left to the orchestrator.

mod context;
mod error;
mod renderer;
mod template;

pub use context::RenderContext;
pub use error::RenderError;
pub use renderer::{PlannedFile, RenderOptions, RenderedFile, plan, render_all};
pub use template::{RenderNote, Rendered, Scope, Template, TemplateSet};
