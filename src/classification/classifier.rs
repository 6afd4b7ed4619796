//! Per-record enrichment: score the feedback, then categorize it.

use super::categorizer::categorize;
use super::lexicon::SentimentLexicon;
use super::scorer::{LexiconScorer, PolarityScorer};
use crate::types::{Category, EnrichedRecord, FeedbackRecord};
use tracing::{debug, info, warn};

/// Applies a [`PolarityScorer`] and the category thresholds to records
///
/// Holds no per-record state, so one classifier can be shared across
/// threads and records may be classified in any order.
#[derive(Debug, Clone)]
pub struct RecordClassifier<S = LexiconScorer> {
    scorer: S,
}

impl RecordClassifier<LexiconScorer> {
    /// Classifier over the built-in lexicon
    pub fn with_builtin_lexicon() -> Self {
        Self::with_lexicon(SentimentLexicon::builtin())
    }

    /// Classifier over a custom lexicon
    pub fn with_lexicon(lexicon: SentimentLexicon) -> Self {
        Self::new(LexiconScorer::new(lexicon))
    }
}

impl Default for RecordClassifier<LexiconScorer> {
    fn default() -> Self {
        Self::with_builtin_lexicon()
    }
}

impl<S: PolarityScorer> RecordClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Enrich one record
    ///
    /// Non-text feedback skips the scorer and becomes a neutral suggestion.
    /// A scorer returning a non-finite value is treated the same way.
    pub fn classify(&self, record: FeedbackRecord) -> EnrichedRecord {
        let (sentiment_score, category) = match record.feedback.as_text() {
            Some(text) => {
                let score = self.scorer.score(text);
                if score.is_finite() {
                    let score = score.clamp(-1.0, 1.0);
                    (score, categorize(score))
                } else {
                    warn!(
                        "Scorer returned {} for topic '{}', defaulting to Suggestion",
                        score, record.topic
                    );
                    (0.0, Category::Suggestion)
                }
            }
            None => {
                debug!(
                    "Non-text feedback {:?} for topic '{}', defaulting to Suggestion",
                    record.feedback, record.topic
                );
                (0.0, Category::Suggestion)
            }
        };

        EnrichedRecord {
            record,
            sentiment_score,
            category,
        }
    }

    /// Enrich a batch, preserving input order
    pub fn classify_all<I>(&self, records: I) -> Vec<EnrichedRecord>
    where
        I: IntoIterator<Item = FeedbackRecord>,
    {
        let enriched: Vec<EnrichedRecord> =
            records.into_iter().map(|r| self.classify(r)).collect();
        info!("Classified {} feedback records", enriched.len());
        enriched
    }
}
