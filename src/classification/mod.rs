//! Sentiment classification of feedback records.
//!
//! # Architecture
//!
//! - **SentimentLexicon**: word valences, boosters and negations
//! - **LexiconScorer**: offline rule-based polarity in [-1, 1]
//! - **categorize**: asymmetric thresholds from score to [`Category`]
//! - **RecordClassifier**: scorer + thresholds applied per record
//!
//! Classification is a pure function of the record: no cross-record state,
//! no I/O, and the same text always yields the same score and category.
//!
//! # Usage
//!
//! ```rust
//! use feedback_core::classification::RecordClassifier;
//! use feedback_core::{Category, FeedbackRecord};
//!
//! let classifier = RecordClassifier::with_builtin_lexicon();
//! let enriched = classifier.classify(FeedbackRecord::new("Leadership", "Great session!"));
//! assert_eq!(enriched.category, Category::Compliment);
//! ```
//!
//! [`Category`]: crate::types::Category

pub mod categorizer;
pub mod classifier;
pub mod lexicon;
pub mod scorer;

pub use categorizer::{categorize, COMPLAINT_THRESHOLD, COMPLIMENT_THRESHOLD};
pub use classifier::RecordClassifier;
pub use lexicon::SentimentLexicon;
pub use scorer::{LexiconScorer, PolarityScorer};
