//! Cross-tabulation command

use anyhow::{Context, Result};
use feedback_core::{cross_tabulate, AnalyzerConfig, Category, ExportFormat};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use super::helpers::{load_and_classify, open_output};

/// Handle crosstab command
///
/// With a category, prints the topic x trainer table for that category;
/// without one, the topic x category distribution.
pub fn handle(
    config: &AnalyzerConfig,
    input: &Path,
    category: Option<Category>,
    output: Option<&Path>,
) -> Result<()> {
    let enriched = load_and_classify(config, input)?;
    let table = cross_tabulate(&enriched, category);

    if table.is_empty() {
        match category {
            Some(c) => warn!("No {} records in {}", c, input.display()),
            None => warn!("No records in {}", input.display()),
        }
    }

    let mut writer = open_output(output)?;
    match output.map(ExportFormat::from_path) {
        None => writer.write_all(table.render_text().as_bytes())?,
        Some(ExportFormat::Csv) => table.write_csv(&mut writer)?,
        Some(ExportFormat::Json) => {
            serde_json::to_writer_pretty(&mut writer, &table.to_dense_table())
                .context("Failed to serialize table")?;
            writer.write_all(b"\n")?;
        }
        Some(ExportFormat::Markdown) => writer.write_all(table.render_markdown().as_bytes())?,
    }
    writer.flush()?;

    if let Some(path) = output {
        info!(
            "Wrote {} x {} table to {}",
            table.rows().len(),
            table.columns().len(),
            path.display()
        );
    }
    Ok(())
}
