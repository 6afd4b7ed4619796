//! Cumulative store command

use anyhow::{Context, Result};
use clap::Subcommand;
use feedback_core::{AnalyzerConfig, CumulativeStore};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand)]
pub enum StoreAction {
    /// Print the cumulative store as CSV
    Show,

    /// Print where the cumulative store lives
    Path,
}

/// Handle store command
pub fn handle(
    config: &AnalyzerConfig,
    action: StoreAction,
    store_path: Option<PathBuf>,
) -> Result<()> {
    let path = config.resolve_store_path(store_path);

    match action {
        StoreAction::Show => {
            let store = CumulativeStore::load(&path)
                .with_context(|| format!("Failed to load cumulative store {}", path.display()))?;
            info!("{} records in {}", store.len(), path.display());

            let mut stdout = std::io::stdout().lock();
            store.write_csv(&mut stdout)?;
            stdout.flush()?;
        }
        StoreAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
