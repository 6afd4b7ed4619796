//! Threshold rule from polarity score to category.
//!
//! The thresholds are asymmetric: a score must reach 0.3 to count as a
//! compliment but only -0.2 to count as a complaint.

use crate::types::Category;

/// Scores at or above this value are compliments
pub const COMPLIMENT_THRESHOLD: f64 = 0.3;

/// Scores at or below this value are complaints
pub const COMPLAINT_THRESHOLD: f64 = -0.2;

/// Map a polarity score to its category
///
/// Boundary values fall into the named bucket. A NaN score fails both
/// comparisons and lands in [`Category::Suggestion`].
pub fn categorize(score: f64) -> Category {
    if score >= COMPLIMENT_THRESHOLD {
        Category::Compliment
    } else if score <= COMPLAINT_THRESHOLD {
        Category::Complaint
    } else {
        Category::Suggestion
    }
}
