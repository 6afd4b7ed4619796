//! Structured field extraction from OCR'd feedback forms.
//!
//! OCR itself happens elsewhere; this module consumes the text it returns,
//! one string per page, and pulls labeled fields out of it. Two label
//! vocabularies are supported (see [`SchemaKind`]).
//!
//! # Example
//!
//! ```rust
//! use feedback_core::extraction::{extract, FieldSchema};
//!
//! let record = extract("Topic: Leadership\nFeedback: Great session!", &FieldSchema::name_date());
//! assert_eq!(record.topic, "Leadership");
//! assert_eq!(record.name, "");
//! ```

pub mod extractor;
pub mod schema;

pub use extractor::{extract, extract_pages, split_pages, write_structured_csv, PAGE_BREAK};
pub use schema::{FieldRule, FieldSchema, MissBehavior, RecordField, SchemaKind};
