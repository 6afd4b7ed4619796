//! Feedback Analyzer - Training Feedback Classification & Aggregation
//!
//! Turns free-text trainee feedback into structured insight:
//! - Offline lexicon-based sentiment scoring
//! - Three-way categorization (Compliment / Complaint / Suggestion)
//! - Topic x trainer and topic x category count tables
//! - Labeled field extraction from OCR'd feedback forms
//! - An append-only cumulative store of extracted records
//!
//! # Architecture
//!
//! The crate is organized into several layers:
//! - **Types**: Core data structures (FeedbackRecord, EnrichedRecord, Category)
//! - **Classification**: Sentiment scorer, categorizer, record classifier
//! - **Aggregation**: Cross-tabulations and their renderings
//! - **Extraction**: Field schemas and the OCR text extractor
//! - **Storage**: The cumulative CSV store
//! - **Report**: Report bundles and record export
//!
//! # Example
//!
//! ```rust
//! use feedback_core::{cross_tabulate, Category, FeedbackRecord, RecordClassifier};
//!
//! let classifier = RecordClassifier::with_builtin_lexicon();
//! let enriched = classifier.classify_all(vec![
//!     FeedbackRecord::new("Rust", "Great session!").with_trainer("Asha"),
//!     FeedbackRecord::new("Rust", "Terrible pacing").with_trainer("Ben"),
//! ]);
//!
//! let heatmap = cross_tabulate(&enriched, Some(Category::Compliment));
//! assert_eq!(heatmap.count("Rust", "Asha"), 1);
//! assert_eq!(heatmap.count("Rust", "Ben"), 0);
//! ```

pub mod aggregation;
pub mod classification;
pub mod config;
pub mod error;
pub mod extraction;
pub mod ingest;
pub mod report;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use aggregation::{categories_present, cross_tabulate, CrossTabulation, DenseTable};
pub use classification::{
    categorize, LexiconScorer, PolarityScorer, RecordClassifier, SentimentLexicon,
};
pub use config::AnalyzerConfig;
pub use error::{FeedbackError, Result};
pub use extraction::{extract, extract_pages, FieldSchema, SchemaKind};
pub use ingest::{load_feedback_csv, load_feedback_json, load_feedback_path};
pub use report::{ExportFormat, FeedbackReport};
pub use storage::{append_to_store, merge, CumulativeStore};
pub use types::{Category, EnrichedRecord, FeedbackRecord, FeedbackValue};
