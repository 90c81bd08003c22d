use clap::Args;
use eyre::{Context, Result};

use super::{Loaded, SpecArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InspectCommand {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Print the full IR as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectCommand {
    /// Run the inspect command
    pub fn run(&self) -> Result<()> {
        let Loaded {
            document, config, ..
        } = self.spec.load()?;

        let ir = match ops::inspect::lower(&document, &config) {
            Ok(ir) => ir,
            Err(failure) => {
                ops::check::failure_report(&self.spec.spec, failure)
                    .render(&mut TerminalOutput::new());
                std::process::exit(1);
            }
        };

        if self.json {
            let json = serde_json::to_string_pretty(&ir).wrap_err("failed to serialize IR")?;
            println!("{json}");
        } else {
            ops::inspect(&ir).render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
