use clap::Args;
use eyre::Result;

use super::{Loaded, SpecArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub spec: SpecArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let Loaded {
            document, config, ..
        } = self.spec.load()?;

        let report = ops::check(&self.spec.spec, &document, &config);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
