//! Field extraction from OCR text.

use super::schema::{FieldRule, FieldSchema, MissBehavior};
use crate::error::Result;
use crate::types::FeedbackRecord;
use std::io::Write;
use tracing::debug;

/// Page separator emitted by OCR engines between pages
pub const PAGE_BREAK: char = '\u{000C}';

/// Parse one page of raw text into a record
///
/// Never fails: a missing label leaves its field empty, except `feedback`,
/// which falls back to the whole trimmed text.
pub fn extract(text: &str, schema: &FieldSchema) -> FeedbackRecord {
    let lines: Vec<&str> = text.lines().collect();
    let mut record = FeedbackRecord::default();

    for rule in schema.rules() {
        let value = match find_field(&lines, rule, schema) {
            Some(value) => value,
            None => {
                debug!("Label '{}' not found", rule.label);
                match rule.on_miss {
                    MissBehavior::Empty => String::new(),
                    MissBehavior::WholeText => text.trim().to_string(),
                }
            }
        };
        rule.field.write(&mut record, value);
    }

    record
}

/// First value for `rule` in the text
///
/// A value stops at the next label on the same line. A label with no value
/// takes the next non-empty line, unless that line is itself another label.
fn find_field(lines: &[&str], rule: &FieldRule, schema: &FieldSchema) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let Some(value) = schema.value_in_line(rule, line) else {
            continue;
        };
        if !value.is_empty() {
            return Some(value);
        }

        let next = lines[i + 1..].iter().map(|l| l.trim()).find(|l| !l.is_empty());
        match next {
            Some(next) if !schema.is_label_line(next) => {
                return Some(schema.cut_at_next_label(next))
            }
            _ => debug!("Label '{}' has no value on line {}", rule.label, i + 1),
        }
    }
    None
}

/// Split OCR output into pages on form feeds, dropping blank pages
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split(PAGE_BREAK)
        .filter(|page| !page.trim().is_empty())
        .collect()
}

/// One record per page, in page order
pub fn extract_pages<S: AsRef<str>>(pages: &[S], schema: &FieldSchema) -> Vec<FeedbackRecord> {
    pages
        .iter()
        .map(|page| extract(page.as_ref(), schema))
        .collect()
}

/// Write records as the flat structured table for `schema`
///
/// UTF-8 CSV with the schema's header row (e.g. Name, Date, Topic, Feedback).
pub fn write_structured_csv<W: Write>(
    records: &[FeedbackRecord],
    schema: &FieldSchema,
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(schema.headers())?;

    for record in records {
        let row: Vec<String> = schema.rules().iter().map(|r| r.field.read(record)).collect();
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackValue;

    #[test]
    fn test_unlabeled_text_falls_back_to_feedback() {
        let text = "This session was very helpful and well organized.";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.name, "");
        assert_eq!(record.date, "");
        assert_eq!(record.topic, "");
        assert_eq!(
            record.feedback,
            FeedbackValue::Text("This session was very helpful and well organized.".to_string())
        );
    }

    #[test]
    fn test_labeled_text() {
        let record = extract(
            "Topic: Leadership\nFeedback: Great session!",
            &FieldSchema::name_date(),
        );
        assert_eq!(record.topic, "Leadership");
        assert_eq!(record.feedback, FeedbackValue::Text("Great session!".to_string()));
        assert_eq!(record.name, "");
        assert_eq!(record.date, "");
    }

    #[test]
    fn test_full_form_case_insensitive() {
        let text = "NAME: Priya Raman\r\ndate - 2024-03-05\r\n  topic: Async Rust\r\nfeedback: Loved the labs\r\n";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.name, "Priya Raman");
        assert_eq!(record.date, "2024-03-05");
        assert_eq!(record.topic, "Async Rust");
        assert_eq!(record.feedback, FeedbackValue::Text("Loved the labs".to_string()));
    }

    #[test]
    fn test_trainer_batch_schema() {
        let text = "Trainer: Asha\nBatch: B-12\nTopic: SQL\nFeedback: Too fast";
        let record = extract(text, &FieldSchema::trainer_batch());
        assert_eq!(record.trainer, "Asha");
        assert_eq!(record.batch, "B-12");
        assert_eq!(record.topic, "SQL");
        assert_eq!(record.name, "");

        // The other vocabulary does not recognize these labels
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.trainer, "");
        assert_eq!(record.topic, "SQL");
    }

    #[test]
    fn test_missing_feedback_uses_whole_text() {
        let text = "  Topic: Testing\nThe exercises were great  ";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.topic, "Testing");
        assert_eq!(
            record.feedback,
            FeedbackValue::Text("Topic: Testing\nThe exercises were great".to_string())
        );
    }

    #[test]
    fn test_value_on_following_line() {
        let text = "Topic:\nOwnership and borrowing\nFeedback:\n\n  More diagrams please\n";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.topic, "Ownership and borrowing");
        assert_eq!(
            record.feedback,
            FeedbackValue::Text("More diagrams please".to_string())
        );
    }

    #[test]
    fn test_empty_label_followed_by_label_is_a_miss() {
        let text = "Name:\nDate: 2024-01-01";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.name, "");
        assert_eq!(record.date, "2024-01-01");
    }

    #[test]
    fn test_labels_sharing_a_line() {
        let text = "Name: Priya Raman    Date: 2024-03-05\nTopic: Async Rust\nFeedback: Loved it";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.name, "Priya Raman");
        assert_eq!(record.date, "2024-03-05");
        assert_eq!(record.topic, "Async Rust");

        let text = "Trainer: Asha  Batch: B7\nTopic:\tSQL\tFeedback: Too fast";
        let record = extract(text, &FieldSchema::trainer_batch());
        assert_eq!(record.trainer, "Asha");
        assert_eq!(record.batch, "B7");
        assert_eq!(record.topic, "SQL");
        assert_eq!(record.feedback, FeedbackValue::Text("Too fast".to_string()));
    }

    #[test]
    fn test_next_line_value_stops_at_label() {
        let text = "Name:\nPriya Raman    Date: 2024-03-05";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.name, "Priya Raman");
        assert_eq!(record.date, "2024-03-05");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Topic: First\nTopic: Second";
        let record = extract(text, &FieldSchema::name_date());
        assert_eq!(record.topic, "First");
    }

    #[test]
    fn test_empty_text() {
        let record = extract("", &FieldSchema::name_date());
        assert_eq!(record.feedback, FeedbackValue::Text(String::new()));
        assert_eq!(record.topic, "");
    }

    #[test]
    fn test_split_and_extract_pages() {
        let text = "Topic: A\nFeedback: good\u{000C}\n\u{000C}Topic: B\nFeedback: bad\u{000C}";
        let pages = split_pages(text);
        assert_eq!(pages.len(), 2);

        let records = extract_pages(&pages, &FieldSchema::name_date());
        assert_eq!(records[0].topic, "A");
        assert_eq!(records[1].topic, "B");
    }

    #[test]
    fn test_write_structured_csv() {
        let records = vec![
            FeedbackRecord::new("Leadership", "Great, really great").with_name("A"),
            FeedbackRecord::new("SQL", "ok").with_date("2024-01-02"),
        ];
        let mut buffer = Vec::new();
        write_structured_csv(&records, &FieldSchema::name_date(), &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv,
            "Name,Date,Topic,Feedback\nA,,Leadership,\"Great, really great\"\n,2024-01-02,SQL,ok\n"
        );
    }
}
