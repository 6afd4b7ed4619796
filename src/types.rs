//! Core data types for the feedback analyzer
//!
//! This module defines the records flowing through the pipeline: raw
//! feedback rows as ingested from tables or OCR text, the enriched records
//! produced by classification, and the category enumeration whose order
//! drives every rendered table.

use crate::error::FeedbackError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value found in a feedback cell
///
/// Tabular sources do not guarantee text: a cell may be empty, hold a
/// number, or (in JSON) hold any other value. Only [`FeedbackValue::Text`]
/// is scored; the other variants classify as [`Category::Suggestion`] with
/// a neutral score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FeedbackValue {
    /// Free text typed by a trainee or recovered by OCR
    Text(String),

    /// Numeric cell (e.g. a rating typed into the feedback column)
    Number(f64),

    /// Empty or absent cell
    #[default]
    Missing,

    /// Any other JSON value (boolean, array, object), kept verbatim
    Other(serde_json::Value),
}

impl FeedbackValue {
    /// Borrow the text, if this is a well-formed text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeedbackValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this value goes through the sentiment scorer
    pub fn is_text(&self) -> bool {
        matches!(self, FeedbackValue::Text(_))
    }

    /// Render the value as a table cell
    pub fn to_cell(&self) -> String {
        match self {
            FeedbackValue::Text(text) => text.clone(),
            FeedbackValue::Number(n) => n.to_string(),
            FeedbackValue::Missing => String::new(),
            FeedbackValue::Other(value) => value.to_string(),
        }
    }

    /// Interpret a raw table cell. Empty cells are missing values.
    pub fn from_cell(cell: &str) -> Self {
        if cell.is_empty() {
            FeedbackValue::Missing
        } else {
            FeedbackValue::Text(cell.to_string())
        }
    }
}

impl From<&str> for FeedbackValue {
    fn from(text: &str) -> Self {
        FeedbackValue::Text(text.to_string())
    }
}

impl From<String> for FeedbackValue {
    fn from(text: String) -> Self {
        FeedbackValue::Text(text)
    }
}

impl std::fmt::Display for FeedbackValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cell())
    }
}

/// One feedback row as ingested
///
/// Which optional attributes are populated depends on the ingestion path:
/// tabular uploads carry trainer/batch, scanned forms carry name/date.
/// Absent attributes are empty strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default, alias = "Trainer", deserialize_with = "lenient_cell::deserialize")]
    pub trainer: String,

    #[serde(default, alias = "Batch", deserialize_with = "lenient_cell::deserialize")]
    pub batch: String,

    #[serde(default, alias = "Topic", deserialize_with = "lenient_cell::deserialize")]
    pub topic: String,

    #[serde(default, alias = "Feedback")]
    pub feedback: FeedbackValue,

    #[serde(default, alias = "Name", deserialize_with = "lenient_cell::deserialize")]
    pub name: String,

    #[serde(default, alias = "Date", deserialize_with = "lenient_cell::deserialize")]
    pub date: String,
}

// Attribute cells accept any value: numbers and booleans keep their text,
// null and nested values become empty strings
mod lenient_cell {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        })
    }
}

impl FeedbackRecord {
    /// Create a record with a topic and textual feedback
    pub fn new(topic: impl Into<String>, feedback: impl Into<FeedbackValue>) -> Self {
        Self {
            topic: topic.into(),
            feedback: feedback.into(),
            ..Default::default()
        }
    }

    /// Set the trainer
    pub fn with_trainer(mut self, trainer: impl Into<String>) -> Self {
        self.trainer = trainer.into();
        self
    }

    /// Set the batch
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = batch.into();
        self
    }

    /// Set the respondent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Discrete classification of a feedback item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Clearly positive feedback
    Compliment,

    /// Clearly negative feedback
    Complaint,

    /// Everything in between, plus feedback that is not text at all
    Suggestion,
}

impl Category {
    /// Order used for table columns, chart series and report sections
    pub const DISPLAY_ORDER: [Category; 3] =
        [Category::Compliment, Category::Complaint, Category::Suggestion];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Compliment => "Compliment",
            Category::Complaint => "Complaint",
            Category::Suggestion => "Suggestion",
        }
    }

    /// Position in [`Category::DISPLAY_ORDER`]
    pub fn display_index(&self) -> usize {
        match self {
            Category::Compliment => 0,
            Category::Complaint => 1,
            Category::Suggestion => 2,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compliment" | "compliments" => Ok(Category::Compliment),
            "complaint" | "complaints" => Ok(Category::Complaint),
            "suggestion" | "suggestions" => Ok(Category::Suggestion),
            other => Err(FeedbackError::InvalidInput(format!(
                "Unknown category '{}' (expected Compliment, Complaint or Suggestion)",
                other
            ))),
        }
    }
}

/// A feedback row with its sentiment score and category
///
/// Produced once per [`FeedbackRecord`] by the classifier and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: FeedbackRecord,

    /// Polarity estimate in [-1, 1]
    pub sentiment_score: f64,

    pub category: Category,
}

impl EnrichedRecord {
    pub fn topic(&self) -> &str {
        &self.record.topic
    }

    pub fn trainer(&self) -> &str {
        &self.record.trainer
    }
}
