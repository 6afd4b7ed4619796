//! Common test utilities and helpers

#![allow(dead_code)]

use feedback_core::{Category, EnrichedRecord, FeedbackRecord};
use std::path::PathBuf;
use tempfile::TempDir;

/// Feedback table covering every category, a blank trainer and an empty cell
///
/// Expected categories, in order: Compliment, Complaint, Suggestion,
/// Compliment, Complaint, Suggestion, Suggestion.
pub const SAMPLE_FEEDBACK_CSV: &str = "\
Trainer,Batch,Topic,Feedback
Asha,B1,Rust,\"Great session, very helpful!\"
Ben,B1,Rust,The pacing was terrible and boring
Asha,B2,Go,Please add more exercises
Ben,B2,Go,Good examples
Asha,B1,Rust,Not good
,B3,SQL,
Chen,B3,SQL,It was okay
";

/// Same rows as [`SAMPLE_FEEDBACK_CSV`] in JSON form, with a numeric cell
pub const SAMPLE_FEEDBACK_JSON: &str = r#"[
    {"Trainer": "Asha", "Batch": "B1", "Topic": "Rust", "Feedback": "Great session, very helpful!"},
    {"Trainer": "Ben", "Batch": "B1", "Topic": "Rust", "Feedback": "The pacing was terrible and boring"},
    {"Trainer": "Asha", "Batch": "B2", "Topic": "Go", "Feedback": 5}
]"#;

/// Write the sample table into a fresh temp dir
pub fn write_sample_csv() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feedback.csv");
    std::fs::write(&path, SAMPLE_FEEDBACK_CSV).unwrap();
    (dir, path)
}

/// Enriched record with a fixed category and neutral score
pub fn enriched(topic: &str, trainer: &str, category: Category) -> EnrichedRecord {
    EnrichedRecord {
        record: FeedbackRecord::new(topic, "text").with_trainer(trainer),
        sentiment_score: 0.0,
        category,
    }
}

/// Store entry in the Name/Date/Topic/Feedback shape
pub fn store_entry(name: &str, date: &str, topic: &str, feedback: &str) -> FeedbackRecord {
    FeedbackRecord::new(topic, feedback)
        .with_name(name)
        .with_date(date)
}
