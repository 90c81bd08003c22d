//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an [`Output`].

mod check;
mod diagnostics;
mod generate;
mod inspect;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateOutcome, GenerateReport, PreviewFile};
pub use inspect::{InspectReport, ModelLine, RouteLine};
pub use output::{Output, Report, TerminalOutput};

#[cfg(test)]
pub use output::RecordingOutput;
