//! Export of enriched records in CSV, JSON or Markdown.

use crate::aggregation::render::escape_markdown;
use crate::error::Result;
use crate::types::EnrichedRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Columns of the classified feedback table
pub const ENRICHED_COLUMNS: [&str; 6] = [
    "Trainer",
    "Batch",
    "Topic",
    "Feedback",
    "Sentiment Score",
    "Category",
];

/// Output format for exported tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    /// Pick a format from a file name; CSV unless the extension says otherwise
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => ExportFormat::Json,
            "md" | "markdown" => ExportFormat::Markdown,
            _ => ExportFormat::Csv,
        }
    }
}

/// Row shape shared by the JSON export
#[derive(Serialize)]
struct EnrichedRow<'a> {
    trainer: &'a str,
    batch: &'a str,
    topic: &'a str,
    feedback: String,
    sentiment_score: f64,
    category: &'static str,
}

impl<'a> From<&'a EnrichedRecord> for EnrichedRow<'a> {
    fn from(e: &'a EnrichedRecord) -> Self {
        Self {
            trainer: &e.record.trainer,
            batch: &e.record.batch,
            topic: &e.record.topic,
            feedback: e.record.feedback.to_cell(),
            sentiment_score: e.sentiment_score,
            category: e.category.as_str(),
        }
    }
}

/// Score as shown in tables
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// Write enriched records in the given format
pub fn write_enriched<W: Write>(
    records: &[EnrichedRecord],
    format: ExportFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            csv_writer.write_record(ENRICHED_COLUMNS)?;
            for e in records {
                csv_writer.write_record([
                    e.record.trainer.as_str(),
                    e.record.batch.as_str(),
                    e.record.topic.as_str(),
                    e.record.feedback.to_cell().as_str(),
                    format_score(e.sentiment_score).as_str(),
                    e.category.as_str(),
                ])?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let rows: Vec<EnrichedRow<'_>> = records.iter().map(EnrichedRow::from).collect();
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.write_all(b"\n")?;
        }
        ExportFormat::Markdown => {
            writer.write_all(render_records_markdown(records, true).as_bytes())?;
        }
    }
    Ok(())
}

/// Markdown table of enriched records
///
/// The report omits the score column and keeps only the category.
pub fn render_records_markdown(records: &[EnrichedRecord], with_score: bool) -> String {
    let columns: Vec<&str> = ENRICHED_COLUMNS
        .iter()
        .copied()
        .filter(|c| with_score || *c != "Sentiment Score")
        .collect();

    let mut out = format!("| {} |\n", columns.join(" | "));
    out.push_str(&format!("|{}\n", "---|".repeat(columns.len())));

    for e in records {
        let mut cells = vec![
            escape_markdown(&e.record.trainer),
            escape_markdown(&e.record.batch),
            escape_markdown(&e.record.topic),
            escape_markdown(&e.record.feedback.to_cell()),
        ];
        if with_score {
            cells.push(format_score(e.sentiment_score));
        }
        cells.push(e.category.to_string());
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}
