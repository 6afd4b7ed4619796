//! Dense renderings of cross-tabulations: CSV, terminal text and Markdown.
//!
//! All three zero-fill cells the table never observed.

use super::crosstab::CrossTabulation;
use crate::error::Result;
use std::io::Write;

/// Label shown for a blank key in human-facing renderings
const BLANK_KEY: &str = "(blank)";

fn display_key(key: &str) -> &str {
    if key.is_empty() {
        BLANK_KEY
    } else {
        key
    }
}

impl CrossTabulation {
    /// Write the table as CSV: header row of column keys, one line per row key
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.columns().len() + 1);
        header.push(self.row_dimension().to_string());
        header.extend(self.columns().iter().cloned());
        csv_writer.write_record(&header)?;

        for (r, row_key) in self.rows().iter().enumerate() {
            let mut line = Vec::with_capacity(header.len());
            line.push(row_key.clone());
            line.extend((0..self.columns().len()).map(|c| self.count_at(r, c).to_string()));
            csv_writer.write_record(&line)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// CSV rendering as a string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Aligned plain-text matrix with row totals
    pub fn render_text(&self) -> String {
        let dense = self.dense();

        let mut header: Vec<String> = vec![self.row_dimension().to_string()];
        header.extend(self.columns().iter().map(|c| display_key(c).to_string()));
        header.push("Total".to_string());

        let mut lines: Vec<Vec<String>> = vec![header];
        for (r, row_key) in self.rows().iter().enumerate() {
            let mut line = vec![display_key(row_key).to_string()];
            line.extend(dense[r].iter().map(|n| n.to_string()));
            line.push(self.row_total(r).to_string());
            lines.push(line);
        }

        let widths: Vec<usize> = (0..lines[0].len())
            .map(|i| lines.iter().map(|l| l[i].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for line in &lines {
            let cells: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == 0 {
                        format!("{:<width$}", cell, width = widths[i])
                    } else {
                        format!("{:>width$}", cell, width = widths[i])
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }

    /// GitHub-flavored Markdown table
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str("| ");
        out.push_str(self.row_dimension());
        for column in self.columns() {
            out.push_str(" | ");
            out.push_str(&escape_markdown(display_key(column)));
        }
        out.push_str(" |\n|---");
        for _ in self.columns() {
            out.push_str("|---:");
        }
        out.push_str("|\n");

        for (r, row_key) in self.rows().iter().enumerate() {
            out.push_str("| ");
            out.push_str(&escape_markdown(display_key(row_key)));
            for c in 0..self.columns().len() {
                out.push_str(&format!(" | {}", self.count_at(r, c)));
            }
            out.push_str(" |\n");
        }
        out
    }
}

/// Escape characters that would break a Markdown table cell
pub(crate) fn escape_markdown(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use crate::aggregation::cross_tabulate;
    use crate::types::{Category, EnrichedRecord, FeedbackRecord};

    fn enriched(topic: &str, trainer: &str, category: Category) -> EnrichedRecord {
        EnrichedRecord {
            record: FeedbackRecord::new(topic, "text").with_trainer(trainer),
            sentiment_score: 0.0,
            category,
        }
    }

    #[test]
    fn test_csv_is_zero_filled() {
        let records = vec![
            enriched("Rust", "Asha", Category::Compliment),
            enriched("Go, advanced", "Ben", Category::Complaint),
        ];
        let csv = cross_tabulate(&records, None).to_csv_string().unwrap();
        assert_eq!(
            csv,
            "Topic,Compliment,Complaint,Suggestion\nRust,1,0,0\n\"Go, advanced\",0,1,0\n"
        );
    }

    #[test]
    fn test_filtered_csv_keeps_blank_trainer_column() {
        let records = vec![
            enriched("Rust", "", Category::Compliment),
            enriched("Rust", "Asha", Category::Compliment),
        ];
        let csv = cross_tabulate(&records, Some(Category::Compliment))
            .to_csv_string()
            .unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let header = reader.headers().unwrap().clone();
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["Topic", "", "Asha"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), vec!["Rust", "1", "1"]);
    }

    #[test]
    fn test_text_rendering_alignment() {
        let records = vec![
            enriched("Rust", "Asha", Category::Compliment),
            enriched("Rust", "Asha", Category::Compliment),
            enriched("Go", "", Category::Compliment),
        ];
        let text = cross_tabulate(&records, Some(Category::Compliment)).render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Topic"));
        assert!(lines[0].contains("(blank)"));
        assert!(lines[0].ends_with("Total"));
        assert!(lines[1].starts_with("Rust"));
        assert!(lines[1].ends_with('2'));
    }

    #[test]
    fn test_markdown_rendering() {
        let records = vec![enriched("A|B", "Asha", Category::Suggestion)];
        let md = cross_tabulate(&records, None).render_markdown();
        assert!(md.starts_with("| Topic | Compliment | Complaint | Suggestion |\n"));
        assert!(md.contains("| A\\|B | 0 | 0 | 1 |"));
    }
}
