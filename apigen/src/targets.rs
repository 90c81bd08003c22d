//! Target dispatch.
//!
//! Maps target names to their template sets and default configuration.

use apigen_codegen::{Target, TargetConfig};
use clap::ValueEnum;
use serde::Deserialize;

/// Available targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    /// Haskell Servant server library
    #[default]
    HaskellServant,
}

impl TargetKind {
    pub fn name(&self) -> &'static str {
        match self {
            TargetKind::HaskellServant => apigen_codegen_haskell::TARGET_NAME,
        }
    }

    /// Default configuration of the target.
    pub fn config(&self) -> TargetConfig {
        match self {
            TargetKind::HaskellServant => apigen_codegen_haskell::config(),
        }
    }

    /// Build the target with a configuration derived from its default one.
    pub fn target(&self, config: TargetConfig) -> Target {
        match self {
            TargetKind::HaskellServant => apigen_codegen_haskell::target_with(config),
        }
    }
}
