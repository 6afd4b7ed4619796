//! Aggregation of enriched records into count tables.
//!
//! Two views feed the report:
//! - **Distribution**: topic x category over every record, dense over the
//!   three categories (the stacked bar chart)
//! - **Heatmap**: topic x trainer restricted to one category
//!
//! Callers pass a fully materialized slice; nothing here reads from a
//! source that may change underneath it.

pub mod crosstab;
pub mod render;

pub use crosstab::{
    categories_present, category_distribution, cross_tabulate, heatmaps_by_category,
    trainer_heatmap, CrossTabulation, DenseTable, CATEGORY_DIMENSION, TOPIC_DIMENSION,
    TRAINER_DIMENSION,
};
