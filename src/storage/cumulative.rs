//! Append-only cumulative store of extracted feedback.
//!
//! Persisted as a single CSV file with header `Name,Date,Topic,Feedback`.
//! Every save rewrites the whole file; there is no streaming append.

use crate::error::{FeedbackError, Result};
use crate::types::{FeedbackRecord, FeedbackValue};
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Canonical column set of the persisted store
pub const STORE_COLUMNS: [&str; 4] = ["Name", "Date", "Topic", "Feedback"];

/// Ordered, append-only sequence of previously saved records
///
/// Records reloaded from disk carry every feedback value as a CSV cell, see
/// [`CumulativeStore::read_csv`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CumulativeStore {
    records: Vec<FeedbackRecord>,
}

impl CumulativeStore {
    /// Empty store with the canonical columns
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FeedbackRecord>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &STORE_COLUMNS
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FeedbackRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append one record; nothing is deduplicated or updated in place
    pub fn merge(mut self, record: FeedbackRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Append records in iteration order
    pub fn merge_all<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = FeedbackRecord>,
    {
        self.records.extend(records);
        self
    }

    /// Parse a store from CSV
    ///
    /// `origin` names the source in error messages. Any header or row
    /// problem is reported as [`FeedbackError::CorruptStore`].
    ///
    /// Feedback cells come back through [`FeedbackValue::from_cell`]: an
    /// empty cell is [`FeedbackValue::Missing`] (even if saved as empty text)
    /// and any other cell is text, so a saved `Number(42.0)` reads back as
    /// `Text("42")`. Both forms classify the same way.
    pub fn read_csv<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let corrupt = |reason: String| FeedbackError::CorruptStore {
            path: origin.to_string(),
            reason,
        };

        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| corrupt(e.to_string()))?
            .clone();

        let matches_columns = headers.len() == STORE_COLUMNS.len()
            && headers
                .iter()
                .zip(STORE_COLUMNS.iter())
                .all(|(found, expected)| found.trim().eq_ignore_ascii_case(expected));
        if !matches_columns {
            return Err(corrupt(format!(
                "expected header {:?}, found {:?}",
                STORE_COLUMNS,
                headers.iter().collect::<Vec<_>>()
            )));
        }

        let mut records = Vec::new();
        for (i, row) in csv_reader.records().enumerate() {
            let row = row.map_err(|e| corrupt(format!("row {}: {}", i + 1, e)))?;
            records.push(FeedbackRecord {
                name: row[0].to_string(),
                date: row[1].to_string(),
                topic: row[2].to_string(),
                feedback: FeedbackValue::from_cell(&row[3]),
                ..Default::default()
            });
        }

        Ok(Self { records })
    }

    /// Serialize the full store as CSV with the canonical header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(STORE_COLUMNS)?;
        for record in &self.records {
            csv_writer.write_record([
                record.name.as_str(),
                record.date.as_str(),
                record.topic.as_str(),
                record.feedback.to_cell().as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Load the store at `path`
    ///
    /// An absent, unreadable, or zero-length file yields an empty store. A
    /// file that exists but does not parse is an error: prior entries are
    /// never discarded silently.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No cumulative store at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => {
                warn!(
                    "Cumulative store at {} is unreadable ({}), starting empty",
                    path.display(),
                    e
                );
                return Ok(Self::new());
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            warn!("Cumulative store at {} is empty, starting empty", path.display());
            return Ok(Self::new());
        }

        let store = Self::read_csv(bytes.as_slice(), &path.display().to_string())?;
        debug!(
            "Loaded {} records from cumulative store {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Rewrite the whole store file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename so readers never see a partial file
        let staging = path.with_extension("csv.partial");
        let written = fs::File::create(&staging)
            .map_err(FeedbackError::from)
            .and_then(|file| self.write_csv(file))
            .and_then(|()| fs::rename(&staging, path).map_err(FeedbackError::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }

        info!(
            "Saved {} records to cumulative store {}",
            self.len(),
            path.display()
        );
        Ok(())
    }
}

/// Append `record` to `store`
pub fn merge(store: CumulativeStore, record: FeedbackRecord) -> CumulativeStore {
    store.merge(record)
}

/// Load, append and save in one read-modify-write cycle
///
/// Not safe against concurrent writers to the same file; callers must
/// serialize access (last save wins).
pub fn append_to_store<I>(path: &Path, records: I) -> Result<CumulativeStore>
where
    I: IntoIterator<Item = FeedbackRecord>,
{
    let store = CumulativeStore::load(path)?.merge_all(records);
    store.save(path)?;
    Ok(store)
}
