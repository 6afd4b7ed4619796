//! Count cross-tabulations over enriched records.
//!
//! Tables are rebuilt from the given slice on every call. Row keys (and
//! trainer column keys) follow first-appearance order in the input;
//! category columns follow [`Category::DISPLAY_ORDER`]. Only observed
//! cells are stored, every other cell reads as zero.

use crate::types::{Category, EnrichedRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Header used for the topic dimension
pub const TOPIC_DIMENSION: &str = "Topic";
/// Header used for the trainer dimension
pub const TRAINER_DIMENSION: &str = "Trainer";
/// Header used for the category dimension
pub const CATEGORY_DIMENSION: &str = "Category";

/// Distinct keys in first-appearance order
#[derive(Debug, Default)]
struct KeyOrder {
    keys: Vec<String>,
    positions: HashMap<String, usize>,
}

impl KeyOrder {
    fn position(&mut self, key: &str) -> usize {
        if let Some(&pos) = self.positions.get(key) {
            return pos;
        }
        let pos = self.keys.len();
        self.keys.push(key.to_string());
        self.positions.insert(key.to_string(), pos);
        pos
    }
}

/// Sparse count matrix keyed by two categorical dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTabulation {
    row_dimension: &'static str,
    column_dimension: &'static str,
    filter: Option<Category>,
    rows: Vec<String>,
    columns: Vec<String>,
    cells: BTreeMap<(usize, usize), usize>,
}

/// Dense, zero-filled form of a [`CrossTabulation`] for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseTable {
    pub row_dimension: String,
    pub column_dimension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTabulation {
    /// Name of the row dimension (always `Topic`)
    pub fn row_dimension(&self) -> &'static str {
        self.row_dimension
    }

    /// Name of the column dimension (`Trainer` or `Category`)
    pub fn column_dimension(&self) -> &'static str {
        self.column_dimension
    }

    /// Category the table was restricted to, if any
    pub fn filter(&self) -> Option<Category> {
        self.filter
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Count at (row index, column index); zero when unobserved
    pub fn count_at(&self, row: usize, column: usize) -> usize {
        self.cells.get(&(row, column)).copied().unwrap_or(0)
    }

    /// Count for a (row key, column key) pair; zero when either key is unknown
    pub fn count(&self, row_key: &str, column_key: &str) -> usize {
        let row = self.rows.iter().position(|k| k == row_key);
        let column = self.columns.iter().position(|k| k == column_key);
        match (row, column) {
            (Some(r), Some(c)) => self.count_at(r, c),
            _ => 0,
        }
    }

    /// Number of materialized (non-zero) cells
    pub fn observed_cells(&self) -> usize {
        self.cells.len()
    }

    /// Zero-filled row-major matrix
    pub fn dense(&self) -> Vec<Vec<usize>> {
        (0..self.rows.len())
            .map(|r| {
                (0..self.columns.len())
                    .map(|c| self.count_at(r, c))
                    .collect()
            })
            .collect()
    }

    pub fn to_dense_table(&self) -> DenseTable {
        DenseTable {
            row_dimension: self.row_dimension.to_string(),
            column_dimension: self.column_dimension.to_string(),
            category: self.filter,
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            counts: self.dense(),
        }
    }

    /// Sum of every cell
    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }

    pub fn row_total(&self, row: usize) -> usize {
        self.cells
            .iter()
            .filter(|((r, _), _)| *r == row)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn column_total(&self, column: usize) -> usize {
        self.cells
            .iter()
            .filter(|((_, c), _)| *c == column)
            .map(|(_, count)| count)
            .sum()
    }

    /// True when no record contributed to the table
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Build a cross-tabulation from a snapshot of enriched records
///
/// With a category, counts (topic, trainer) pairs among records of that
/// category; blank trainers form their own column. Without one, counts
/// (topic, category) pairs over every record, always with all three
/// category columns.
pub fn cross_tabulate(records: &[EnrichedRecord], filter: Option<Category>) -> CrossTabulation {
    let mut rows = KeyOrder::default();
    let mut cells = BTreeMap::new();

    match filter {
        Some(category) => {
            let mut columns = KeyOrder::default();
            for record in records.iter().filter(|r| r.category == category) {
                let row = rows.position(record.topic());
                let column = columns.position(record.trainer());
                *cells.entry((row, column)).or_insert(0) += 1;
            }

            CrossTabulation {
                row_dimension: TOPIC_DIMENSION,
                column_dimension: TRAINER_DIMENSION,
                filter,
                rows: rows.keys,
                columns: columns.keys,
                cells,
            }
        }
        None => {
            for record in records {
                let row = rows.position(record.topic());
                let column = record.category.display_index();
                *cells.entry((row, column)).or_insert(0) += 1;
            }

            CrossTabulation {
                row_dimension: TOPIC_DIMENSION,
                column_dimension: CATEGORY_DIMENSION,
                filter: None,
                rows: rows.keys,
                columns: Category::DISPLAY_ORDER
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
                cells,
            }
        }
    }
}

/// Topic x category counts over all records
pub fn category_distribution(records: &[EnrichedRecord]) -> CrossTabulation {
    cross_tabulate(records, None)
}

/// Topic x trainer counts for one category
pub fn trainer_heatmap(records: &[EnrichedRecord], category: Category) -> CrossTabulation {
    cross_tabulate(records, Some(category))
}

/// Categories observed in the batch, in display order
pub fn categories_present(records: &[EnrichedRecord]) -> Vec<Category> {
    Category::DISPLAY_ORDER
        .iter()
        .copied()
        .filter(|category| records.iter().any(|r| r.category == *category))
        .collect()
}

/// One topic x trainer table per observed category
pub fn heatmaps_by_category(records: &[EnrichedRecord]) -> Vec<(Category, CrossTabulation)> {
    categories_present(records)
        .into_iter()
        .map(|category| (category, trainer_heatmap(records, category)))
        .collect()
}
