//! Record classification command

use anyhow::{Context, Result};
use feedback_core::{report::write_enriched, AnalyzerConfig, ExportFormat};
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::helpers::{load_and_classify, open_output};

/// Handle classify command
pub fn handle(config: &AnalyzerConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    let enriched = load_and_classify(config, input)?;

    let format = output.map(ExportFormat::from_path).unwrap_or(ExportFormat::Csv);
    let mut writer = open_output(output)?;
    write_enriched(&enriched, format, &mut writer).context("Failed to write classified records")?;
    writer.flush()?;

    if let Some(path) = output {
        info!("Wrote {} classified records to {}", enriched.len(), path.display());
    }
    Ok(())
}
