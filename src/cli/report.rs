//! Report bundle command

use anyhow::{Context, Result};
use feedback_core::{AnalyzerConfig, FeedbackReport};
use std::path::{Path, PathBuf};

use super::helpers::load_and_classify;

/// Handle report command
pub fn handle(config: &AnalyzerConfig, input: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let enriched = load_and_classify(config, input)?;
    let report = FeedbackReport::build(enriched);

    let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    let written = report
        .write_to_dir(&dir)
        .with_context(|| format!("Failed to write report to {}", dir.display()))?;

    for (category, count) in report.category_counts() {
        println!("{:<12} {}", category, count);
    }
    println!();
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}
