//! Loading feedback tables.
//!
//! Tabular uploads must carry `Topic` and `Feedback` columns; `Trainer`,
//! `Batch`, `Name` and `Date` are optional. Headers match
//! case-insensitively and unknown columns are ignored. JSON input is an
//! array of record objects.

use crate::error::{FeedbackError, Result};
use crate::types::{FeedbackRecord, FeedbackValue};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Header positions discovered in a feedback table
#[derive(Debug, Default)]
struct ColumnMap {
    trainer: Option<usize>,
    batch: Option<usize>,
    topic: usize,
    feedback: usize,
    name: Option<usize>,
    date: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |label: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(label))
        };

        let topic = find("topic").ok_or_else(|| FeedbackError::MissingColumn("Topic".into()))?;
        let feedback =
            find("feedback").ok_or_else(|| FeedbackError::MissingColumn("Feedback".into()))?;

        Ok(Self {
            trainer: find("trainer"),
            batch: find("batch"),
            topic,
            feedback,
            name: find("name"),
            date: find("date"),
        })
    }

    fn record(&self, row: &csv::StringRecord) -> FeedbackRecord {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };

        FeedbackRecord {
            trainer: cell(self.trainer),
            batch: cell(self.batch),
            topic: cell(Some(self.topic)),
            feedback: row
                .get(self.feedback)
                .map(FeedbackValue::from_cell)
                .unwrap_or_default(),
            name: cell(self.name),
            date: cell(self.date),
        }
    }
}

/// Read feedback rows from CSV
///
/// Short rows are padded with empty cells rather than rejected.
pub fn load_feedback_csv<R: Read>(reader: R) -> Result<Vec<FeedbackRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
    debug!("Feedback table columns: {:?}", columns);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        records.push(columns.record(&row?));
    }
    Ok(records)
}

/// Read feedback records from a JSON array
pub fn load_feedback_json<R: Read>(reader: R) -> Result<Vec<FeedbackRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read a CSV feedback file
pub fn load_feedback_csv_path(path: &Path) -> Result<Vec<FeedbackRecord>> {
    load_feedback_csv(BufReader::new(File::open(path)?))
}

/// Load a feedback file, choosing the format by extension
///
/// `.json` is read as JSON; anything else as CSV.
pub fn load_feedback_path(path: &Path) -> Result<Vec<FeedbackRecord>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        load_feedback_json(BufReader::new(File::open(path)?))?
    } else {
        load_feedback_csv_path(path)?
    };

    info!("Loaded {} feedback records from {}", records.len(), path.display());
    Ok(records)
}
