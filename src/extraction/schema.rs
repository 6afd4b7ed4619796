//! Label vocabularies for scanned feedback forms.
//!
//! A schema is an ordered list of field rules. Supporting a new form
//! layout means adding a schema, not new matching code.

use crate::error::FeedbackError;
use crate::types::{FeedbackRecord, FeedbackValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Record attribute a rule fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Name,
    Date,
    Trainer,
    Batch,
    Topic,
    Feedback,
}

impl RecordField {
    /// Label printed on forms for this attribute
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::Name => "name",
            RecordField::Date => "date",
            RecordField::Trainer => "trainer",
            RecordField::Batch => "batch",
            RecordField::Topic => "topic",
            RecordField::Feedback => "feedback",
        }
    }

    fn patterns(&self) -> &'static LabelPatterns {
        match self {
            RecordField::Name => &NAME_PATTERNS,
            RecordField::Date => &DATE_PATTERNS,
            RecordField::Trainer => &TRAINER_PATTERNS,
            RecordField::Batch => &BATCH_PATTERNS,
            RecordField::Topic => &TOPIC_PATTERNS,
            RecordField::Feedback => &FEEDBACK_PATTERNS,
        }
    }

    /// Read this attribute from a record as a table cell
    pub fn read(&self, record: &FeedbackRecord) -> String {
        match self {
            RecordField::Name => record.name.clone(),
            RecordField::Date => record.date.clone(),
            RecordField::Trainer => record.trainer.clone(),
            RecordField::Batch => record.batch.clone(),
            RecordField::Topic => record.topic.clone(),
            RecordField::Feedback => record.feedback.to_cell(),
        }
    }

    /// Store an extracted value into a record
    pub fn write(&self, record: &mut FeedbackRecord, value: String) {
        match self {
            RecordField::Name => record.name = value,
            RecordField::Date => record.date = value,
            RecordField::Trainer => record.trainer = value,
            RecordField::Batch => record.batch = value,
            RecordField::Topic => record.topic = value,
            RecordField::Feedback => record.feedback = FeedbackValue::Text(value),
        }
    }
}

/// What to do when a label is absent from the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissBehavior {
    /// Leave the field empty
    Empty,
    /// Use the whole trimmed text
    WholeText,
}

/// Compiled matchers for one label
#[derive(Debug)]
struct LabelPatterns {
    /// Label opening a line; the `:` or `-` separator is optional
    line_start: Regex,
    /// Label after a column gap (two spaces or a tab); separator required
    inline: Regex,
}

impl LabelPatterns {
    fn compile(label: &str) -> Self {
        let label = regex::escape(label);
        Self {
            line_start: Regex::new(&format!(r"(?i)^[ \t]*{}\b(?:[ \t]*[:\-])?(.*)$", label))
                .unwrap(),
            inline: Regex::new(&format!(r"(?i)(?: {{2,}}|\t)[ \t]*{}\b[ \t]*[:\-](.*)$", label))
                .unwrap(),
        }
    }
}

static NAME_PATTERNS: Lazy<LabelPatterns> = Lazy::new(|| LabelPatterns::compile("name"));
static DATE_PATTERNS: Lazy<LabelPatterns> = Lazy::new(|| LabelPatterns::compile("date"));
static TRAINER_PATTERNS: Lazy<LabelPatterns> = Lazy::new(|| LabelPatterns::compile("trainer"));
static BATCH_PATTERNS: Lazy<LabelPatterns> = Lazy::new(|| LabelPatterns::compile("batch"));
static TOPIC_PATTERNS: Lazy<LabelPatterns> = Lazy::new(|| LabelPatterns::compile("topic"));
static FEEDBACK_PATTERNS: Lazy<LabelPatterns> = Lazy::new(|| LabelPatterns::compile("feedback"));

/// One labeled field of a form
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: RecordField,
    /// Label as written on the form (matched case-insensitively)
    pub label: &'static str,
    /// Column header in the structured export
    pub header: &'static str,
    pub on_miss: MissBehavior,
    patterns: &'static LabelPatterns,
}

impl FieldRule {
    fn new(field: RecordField, header: &'static str, on_miss: MissBehavior) -> Self {
        Self {
            field,
            label: field.label(),
            header,
            on_miss,
            patterns: field.patterns(),
        }
    }

    /// Raw text following this rule's label on `line`
    ///
    /// A label at line start wins over one further along the line.
    fn capture<'t>(&self, line: &'t str) -> Option<&'t str> {
        self.patterns
            .line_start
            .captures(line)
            .or_else(|| self.patterns.inline.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Whether `line` opens with this rule's label
    pub fn starts_line(&self, line: &str) -> bool {
        self.patterns.line_start.is_match(line)
    }

    /// Trimmed remainder of `line` after this rule's label, if the line carries it
    ///
    /// The remainder still contains any later labels on the same line; see
    /// [`FieldSchema::value_in_line`] for the value cut at the next label.
    pub fn match_line<'t>(&self, line: &'t str) -> Option<&'t str> {
        self.capture(line).map(str::trim)
    }
}

/// Which label vocabulary a form uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Name / Date / Topic / Feedback (editable OCR forms)
    #[default]
    NameDate,
    /// Trainer / Batch / Topic / Feedback
    TrainerBatch,
}

impl FromStr for SchemaKind {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "name-date" => Ok(SchemaKind::NameDate),
            "trainer-batch" => Ok(SchemaKind::TrainerBatch),
            other => Err(FeedbackError::InvalidInput(format!(
                "Unknown schema '{}' (expected name-date or trainer-batch)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaKind::NameDate => write!(f, "name-date"),
            SchemaKind::TrainerBatch => write!(f, "trainer-batch"),
        }
    }
}

/// Ordered field rules for one form layout
#[derive(Debug, Clone)]
pub struct FieldSchema {
    kind: SchemaKind,
    rules: Vec<FieldRule>,
}

impl FieldSchema {
    /// Name, Date, Topic, Feedback
    pub fn name_date() -> Self {
        Self {
            kind: SchemaKind::NameDate,
            rules: vec![
                FieldRule::new(RecordField::Name, "Name", MissBehavior::Empty),
                FieldRule::new(RecordField::Date, "Date", MissBehavior::Empty),
                FieldRule::new(RecordField::Topic, "Topic", MissBehavior::Empty),
                FieldRule::new(RecordField::Feedback, "Feedback", MissBehavior::WholeText),
            ],
        }
    }

    /// Trainer, Batch, Topic, Feedback
    pub fn trainer_batch() -> Self {
        Self {
            kind: SchemaKind::TrainerBatch,
            rules: vec![
                FieldRule::new(RecordField::Trainer, "Trainer", MissBehavior::Empty),
                FieldRule::new(RecordField::Batch, "Batch", MissBehavior::Empty),
                FieldRule::new(RecordField::Topic, "Topic", MissBehavior::Empty),
                FieldRule::new(RecordField::Feedback, "Feedback", MissBehavior::WholeText),
            ],
        }
    }

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::NameDate => Self::name_date(),
            SchemaKind::TrainerBatch => Self::trainer_batch(),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Export column headers, in rule order
    pub fn headers(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.header).collect()
    }

    /// Whether a line starts with any label of this schema
    pub fn is_label_line(&self, line: &str) -> bool {
        self.rules.iter().any(|r| r.starts_line(line))
    }

    /// Value of `rule` on `line`, stopping at the next label of this schema
    ///
    /// OCR often flattens a form row into one line, e.g.
    /// `Name: Priya Raman    Date: 2024-03-05`.
    pub fn value_in_line(&self, rule: &FieldRule, line: &str) -> Option<String> {
        rule.capture(line).map(|raw| self.cut_at_next_label(raw))
    }

    /// `text` up to the first column-gapped label of this schema, trimmed
    pub fn cut_at_next_label(&self, text: &str) -> String {
        let end = self
            .rules
            .iter()
            .filter_map(|r| r.patterns.inline.find(text).map(|m| m.start()))
            .min()
            .unwrap_or(text.len());
        text[..end].trim().to_string()
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::name_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_line_separators() {
        let schema = FieldSchema::name_date();
        let topic = &schema.rules()[2];
        assert_eq!(topic.match_line("Topic: Leadership"), Some("Leadership"));
        assert_eq!(topic.match_line("TOPIC - Leadership "), Some("Leadership"));
        assert_eq!(topic.match_line("  topic Leadership"), Some("Leadership"));
        assert_eq!(topic.match_line("Topic:"), Some(""));
        assert_eq!(topic.match_line("Topics: many"), None);
        assert_eq!(topic.match_line("The topic: was fine"), None);
        assert_eq!(topic.match_line("Feedback: the topic was fine"), None);
    }

    #[test]
    fn test_label_after_column_gap() {
        let schema = FieldSchema::name_date();
        let (name, date) = (&schema.rules()[0], &schema.rules()[1]);
        let line = "Name: Priya Raman    Date: 2024-03-05";

        assert_eq!(schema.value_in_line(name, line).as_deref(), Some("Priya Raman"));
        assert_eq!(schema.value_in_line(date, line).as_deref(), Some("2024-03-05"));
        assert!(schema.is_label_line(line));
        assert!(!date.starts_line(line));

        // A single space is prose, not a column gap
        assert_eq!(date.match_line("We met on the date: Monday"), None);
        // Inline labels need an explicit separator
        assert_eq!(date.match_line("Name: Ana  date unknown"), None);
    }

    #[test]
    fn test_empty_value_before_gapped_label() {
        let schema = FieldSchema::trainer_batch();
        let (trainer, batch) = (&schema.rules()[0], &schema.rules()[1]);
        let line = "Trainer:\tBatch: B7";

        assert_eq!(schema.value_in_line(trainer, line).as_deref(), Some(""));
        assert_eq!(schema.value_in_line(batch, line).as_deref(), Some("B7"));
    }

    #[test]
    fn test_patterns_are_shared() {
        let a = FieldSchema::name_date();
        let b = FieldSchema::name_date();
        assert!(std::ptr::eq(a.rules()[0].patterns, b.rules()[0].patterns));
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            FieldSchema::name_date().headers(),
            vec!["Name", "Date", "Topic", "Feedback"]
        );
        assert_eq!(
            FieldSchema::trainer_batch().headers(),
            vec!["Trainer", "Batch", "Topic", "Feedback"]
        );
    }

    #[test]
    fn test_schema_kind_parsing() {
        assert_eq!("name-date".parse::<SchemaKind>().unwrap(), SchemaKind::NameDate);
        assert_eq!(
            "Trainer_Batch".parse::<SchemaKind>().unwrap(),
            SchemaKind::TrainerBatch
        );
        assert!("free-form".parse::<SchemaKind>().is_err());
        assert_eq!(SchemaKind::TrainerBatch.to_string(), "trainer-batch");
        assert_eq!(FieldSchema::for_kind(SchemaKind::TrainerBatch).kind(), SchemaKind::TrainerBatch);
    }

    #[test]
    fn test_only_feedback_falls_back_to_whole_text() {
        for schema in [FieldSchema::name_date(), FieldSchema::trainer_batch()] {
            let fallbacks: Vec<RecordField> = schema
                .rules()
                .iter()
                .filter(|r| r.on_miss == MissBehavior::WholeText)
                .map(|r| r.field)
                .collect();
            assert_eq!(fallbacks, vec![RecordField::Feedback]);
        }
    }
}
