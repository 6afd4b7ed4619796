//! Feedback reports
//!
//! A [`FeedbackReport`] bundles everything derived from one classification
//! run: the enriched records, the topic x category distribution, and one
//! topic x trainer heatmap per category present in the data.
//!
//! # Architecture
//!
//! - **Build**: classify once, aggregate from the materialized result
//! - **Write**: [`FeedbackReport::write_to_dir`] emits CSV tables plus a
//!   Markdown summary into an output directory
//! - **Export**: [`export`] writes enriched records as CSV, JSON or Markdown
//!
//! # Usage
//!
//! ```rust
//! use feedback_core::classification::RecordClassifier;
//! use feedback_core::report::FeedbackReport;
//! use feedback_core::types::FeedbackRecord;
//!
//! let classifier = RecordClassifier::with_builtin_lexicon();
//! let records = vec![FeedbackRecord::new("Rust", "Great session!").with_trainer("Asha")];
//! let report = FeedbackReport::build(classifier.classify_all(records));
//! assert_eq!(report.heatmaps().len(), 1);
//! ```

pub mod export;

use crate::aggregation::{category_distribution, heatmaps_by_category, CrossTabulation};
use crate::error::Result;
use crate::types::{Category, EnrichedRecord};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use export::{
    format_score, render_records_markdown, write_enriched, ExportFormat, ENRICHED_COLUMNS,
};

/// File name of the classified records table
pub const CLASSIFIED_FILE: &str = "classified_feedback.csv";
/// File name of the distribution table
pub const DISTRIBUTION_FILE: &str = "distribution.csv";
/// File name of the Markdown summary
pub const SUMMARY_FILE: &str = "report.md";

/// File name of the heatmap for `category`
pub fn heatmap_file_name(category: Category) -> String {
    format!("heatmap_{}.csv", category.as_str())
}

/// Aggregated view of one classification run
#[derive(Debug, Clone)]
pub struct FeedbackReport {
    generated_at: DateTime<Local>,
    records: Vec<EnrichedRecord>,
    distribution: CrossTabulation,
    heatmaps: Vec<(Category, CrossTabulation)>,
}

impl FeedbackReport {
    /// Build a report stamped with the current local time
    pub fn build(records: Vec<EnrichedRecord>) -> Self {
        Self::build_at(records, Local::now())
    }

    /// Build a report with an explicit timestamp
    pub fn build_at(records: Vec<EnrichedRecord>, generated_at: DateTime<Local>) -> Self {
        let distribution = category_distribution(&records);
        let heatmaps = heatmaps_by_category(&records);
        debug!(
            "Built report: {} records, {} topics, {} heatmaps",
            records.len(),
            distribution.rows().len(),
            heatmaps.len()
        );
        Self {
            generated_at,
            records,
            distribution,
            heatmaps,
        }
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn distribution(&self) -> &CrossTabulation {
        &self.distribution
    }

    /// Heatmaps in category display order, only for categories present
    pub fn heatmaps(&self) -> &[(Category, CrossTabulation)] {
        &self.heatmaps
    }

    /// Record count per category, in display order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::DISPLAY_ORDER
            .iter()
            .map(|&category| {
                let count = self
                    .records
                    .iter()
                    .filter(|e| e.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }

    /// Markdown summary: counts, distribution, heatmaps and the record table
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("# Training Feedback Report\n\n");
        out.push_str(&format!(
            "Generated: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        ));

        out.push_str("## Summary\n\n");
        out.push_str(&format!("- Records: {}\n", self.records.len()));
        for (category, count) in self.category_counts() {
            out.push_str(&format!("- {}: {}\n", category, count));
        }

        out.push_str("\n## Sentiment Distribution by Topic\n\n");
        out.push_str(&self.distribution.render_markdown());

        for (category, heatmap) in &self.heatmaps {
            out.push_str(&format!("\n## {} Heatmap (Topic x Trainer)\n\n", category));
            out.push_str(&heatmap.render_markdown());
        }

        out.push_str("\n## Classified Feedback\n\n");
        out.push_str(&render_records_markdown(&self.records, false));
        out
    }

    /// Write every table and the summary into `dir`, creating it if needed
    ///
    /// Returns the paths written, classified records first.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        let path = dir.join(CLASSIFIED_FILE);
        write_enriched(&self.records, ExportFormat::Csv, fs::File::create(&path)?)?;
        written.push(path);

        let path = dir.join(DISTRIBUTION_FILE);
        self.distribution.write_csv(fs::File::create(&path)?)?;
        written.push(path);

        for (category, heatmap) in &self.heatmaps {
            let path = dir.join(heatmap_file_name(*category));
            heatmap.write_csv(fs::File::create(&path)?)?;
            written.push(path);
        }

        let path = dir.join(SUMMARY_FILE);
        fs::write(&path, self.render_markdown())?;
        written.push(path);

        info!("Wrote {} report files to {}", written.len(), dir.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackRecord;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn enriched(trainer: &str, topic: &str, category: Category) -> EnrichedRecord {
        EnrichedRecord {
            record: FeedbackRecord::new(topic, "text").with_trainer(trainer),
            sentiment_score: 0.0,
            category,
        }
    }

    fn sample_report() -> FeedbackReport {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap();
        FeedbackReport::build_at(
            vec![
                enriched("Asha", "Rust", Category::Compliment),
                enriched("Ben", "Go", Category::Complaint),
                enriched("Asha", "Rust", Category::Compliment),
            ],
            at,
        )
    }

    #[test]
    fn test_heatmaps_only_for_present_categories() {
        let report = sample_report();
        let categories: Vec<Category> = report.heatmaps().iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, vec![Category::Compliment, Category::Complaint]);
        assert_eq!(report.heatmaps()[0].1.count("Rust", "Asha"), 2);
    }

    #[test]
    fn test_category_counts() {
        let counts = sample_report().category_counts();
        assert_eq!(
            counts,
            vec![
                (Category::Compliment, 2),
                (Category::Complaint, 1),
                (Category::Suggestion, 0),
            ]
        );
    }

    #[test]
    fn test_markdown_summary() {
        let md = sample_report().render_markdown();
        assert!(md.starts_with("# Training Feedback Report\n\nGenerated: 2024-03-05 14:07\n"));
        assert!(md.contains("- Compliment: 2\n"));
        assert!(md.contains("## Compliment Heatmap (Topic x Trainer)"));
        assert!(!md.contains("## Suggestion Heatmap"));
        assert!(md.contains("| Asha |  | Rust | text | Compliment |"));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("reports");
        let written = sample_report().write_to_dir(&out).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "classified_feedback.csv",
                "distribution.csv",
                "heatmap_Compliment.csv",
                "heatmap_Complaint.csv",
                "report.md",
            ]
        );

        let distribution = fs::read_to_string(out.join(DISTRIBUTION_FILE)).unwrap();
        assert_eq!(
            distribution,
            "Topic,Compliment,Complaint,Suggestion\nRust,2,0,0\nGo,0,1,0\n"
        );
    }

    #[test]
    fn test_empty_report() {
        let report = FeedbackReport::build(Vec::new());
        assert!(report.heatmaps().is_empty());
        assert!(report.distribution().is_empty());
    }
}
