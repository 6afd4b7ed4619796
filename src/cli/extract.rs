//! Field extraction command

use anyhow::{Context, Result};
use feedback_core::extraction::{extract_pages, split_pages, write_structured_csv};
use feedback_core::{append_to_store, AnalyzerConfig, FeedbackRecord, FieldSchema, SchemaKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::helpers::open_output;

/// Handle extract command
pub fn handle(
    config: &AnalyzerConfig,
    inputs: &[PathBuf],
    schema: Option<SchemaKind>,
    output: Option<&Path>,
    append: bool,
    store_path: Option<PathBuf>,
) -> Result<()> {
    let schema = FieldSchema::for_kind(schema.unwrap_or(config.schema));
    debug!("Extracting with {} schema", schema.kind());

    let mut records: Vec<FeedbackRecord> = Vec::new();
    for input in inputs {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let pages = split_pages(&text);
        if pages.is_empty() {
            warn!("No text in {}, skipping", input.display());
            continue;
        }
        records.extend(extract_pages(&pages, &schema));
    }
    info!("Extracted {} records from {} files", records.len(), inputs.len());

    let mut writer = open_output(output)?;
    write_structured_csv(&records, &schema, &mut writer)
        .context("Failed to write extracted records")?;
    writer.flush()?;

    if append {
        if schema.kind() == SchemaKind::TrainerBatch {
            warn!("The cumulative store keeps Name, Date, Topic and Feedback only");
        }
        let path = config.resolve_store_path(store_path);
        let store = append_to_store(&path, records)
            .with_context(|| format!("Failed to update cumulative store {}", path.display()))?;
        info!("Cumulative store {} now holds {} records", path.display(), store.len());
    }
    Ok(())
}
