//! Configuration inspection command

use anyhow::Result;
use clap::Subcommand;
use feedback_core::AnalyzerConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
}

/// Handle configuration command
pub fn handle(config: &AnalyzerConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
