//! Built-in pipeline phases.
//!
//! - [`ReadPhase`] - checks the document's required sections
//! - [`LowerPhase`] - builds the IR from the document

mod lower;
mod read;

pub use lower::LowerPhase;
pub use read::ReadPhase;
