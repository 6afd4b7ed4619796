//! Valence lexicon for rule-based sentiment scoring.
//!
//! Valences live on a [-4, 4] scale. The built-in table is tuned for
//! training and workshop feedback; deployments extend it through the
//! `[lexicon]` section of the configuration file.

use crate::error::{FeedbackError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Largest absolute valence a lexicon entry may carry
pub const MAX_VALENCE: f64 = 4.0;

/// Scalar added by an intensifying booster word
pub const BOOSTER_INCREMENT: f64 = 0.293;

/// Scalar added by a dampening booster word
pub const BOOSTER_DECREMENT: f64 = -0.293;

const BUILTIN_VALENCES: &[(&str, f64)] = &[
    // Positive
    ("amazing", 2.8),
    ("appreciate", 1.7),
    ("appreciated", 2.3),
    ("awesome", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("clear", 1.6),
    ("clearly", 1.7),
    ("comfortable", 1.5),
    ("confident", 2.2),
    ("effective", 2.1),
    ("efficient", 1.6),
    ("engaging", 1.6),
    ("enjoy", 2.2),
    ("enjoyable", 1.9),
    ("enjoyed", 2.3),
    ("enthusiastic", 1.9),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressive", 2.3),
    ("insightful", 1.9),
    ("inspiring", 2.0),
    ("interesting", 1.7),
    ("knowledgeable", 1.6),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("motivating", 1.7),
    ("nice", 1.8),
    ("organized", 1.2),
    ("outstanding", 3.0),
    ("patient", 1.2),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("positive", 2.6),
    ("practical", 0.9),
    ("recommend", 1.5),
    ("satisfied", 1.8),
    ("superb", 3.1),
    ("supportive", 1.8),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("wonderful", 2.7),
    // Negative
    ("angry", -2.3),
    ("annoying", -1.9),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bored", -1.1),
    ("boring", -1.3),
    ("confused", -1.3),
    ("confusing", -1.3),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("dislike", -1.6),
    ("disorganized", -1.6),
    ("fail", -2.3),
    ("failed", -2.3),
    ("frustrated", -2.0),
    ("frustrating", -1.9),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("irrelevant", -1.0),
    ("lack", -1.3),
    ("lacking", -1.2),
    ("mess", -1.5),
    ("monotonous", -1.2),
    ("negative", -2.7),
    ("outdated", -1.2),
    ("poor", -2.1),
    ("poorly", -2.0),
    ("problem", -1.7),
    ("problems", -1.7),
    ("rude", -2.0),
    ("rushed", -1.0),
    ("sad", -2.1),
    ("tedious", -1.5),
    ("terrible", -2.1),
    ("unclear", -1.0),
    ("unhappy", -1.8),
    ("unprepared", -1.5),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("weak", -1.9),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const INCREMENTING_BOOSTERS: &[&str] = &[
    "absolutely",
    "amazingly",
    "completely",
    "considerably",
    "deeply",
    "entirely",
    "especially",
    "exceptionally",
    "extremely",
    "fully",
    "greatly",
    "highly",
    "hugely",
    "incredibly",
    "particularly",
    "really",
    "remarkably",
    "so",
    "substantially",
    "thoroughly",
    "too",
    "totally",
    "tremendously",
    "truly",
    "very",
];

const DAMPENING_BOOSTERS: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "less",
    "marginally",
    "occasionally",
    "partly",
    "scarcely",
    "slightly",
    "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt", "hasnt",
    "havent", "isnt", "neither", "never", "no", "nobody", "none", "nor", "not", "nothing",
    "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

static BUILTIN: Lazy<SentimentLexicon> = Lazy::new(|| {
    let valences = BUILTIN_VALENCES
        .iter()
        .map(|(word, valence)| (word.to_string(), *valence))
        .collect();

    let boosters = INCREMENTING_BOOSTERS
        .iter()
        .map(|word| (word.to_string(), BOOSTER_INCREMENT))
        .chain(
            DAMPENING_BOOSTERS
                .iter()
                .map(|word| (word.to_string(), BOOSTER_DECREMENT)),
        )
        .collect();

    SentimentLexicon { valences, boosters }
});

/// Word tables consulted by the lexicon scorer
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SentimentLexicon {
    /// The built-in lexicon
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Built-in lexicon extended (or overridden) with custom valences
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut lexicon = Self::builtin();
        for (word, valence) in overrides {
            lexicon.insert(word, *valence)?;
        }
        Ok(lexicon)
    }

    /// Add or replace a word's valence
    pub fn insert(&mut self, word: &str, valence: f64) -> Result<()> {
        if !valence.is_finite() || valence.abs() > MAX_VALENCE {
            return Err(FeedbackError::InvalidInput(format!(
                "Valence for '{}' must be within [-{max}, {max}], got {}",
                word,
                valence,
                max = MAX_VALENCE
            )));
        }
        let key = normalize_word(word);
        if key.is_empty() {
            return Err(FeedbackError::InvalidInput(
                "Lexicon word cannot be empty".to_string(),
            ));
        }
        self.valences.insert(key, valence);
        Ok(())
    }

    /// Valence of a lowercased word, if it carries sentiment
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Booster scalar of a lowercased word
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Whether a lowercased word negates what follows it
    pub fn is_negation(&self, word: &str) -> bool {
        if word.ends_with("n't") {
            return true;
        }
        let collapsed: String = word.chars().filter(|c| *c != '\'').collect();
        NEGATIONS.contains(&collapsed.as_str())
    }

    /// Number of sentiment-bearing words
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_valences_in_range() {
        for (word, valence) in BUILTIN_VALENCES {
            assert!(valence.abs() <= MAX_VALENCE, "{} out of range", word);
        }
        assert_eq!(SentimentLexicon::builtin().len(), BUILTIN_VALENCES.len());
    }

    #[test]
    fn test_lookup() {
        let lexicon = SentimentLexicon::builtin();
        assert!(lexicon.valence("great").unwrap() > 0.0);
        assert!(lexicon.valence("boring").unwrap() < 0.0);
        assert!(lexicon.valence("session").is_none());
        assert_eq!(lexicon.booster("very"), Some(BOOSTER_INCREMENT));
        assert_eq!(lexicon.booster("slightly"), Some(BOOSTER_DECREMENT));
    }

    #[test]
    fn test_negation_forms() {
        let lexicon = SentimentLexicon::builtin();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("wasn't"));
        assert!(lexicon.is_negation("wasnt"));
        assert!(lexicon.is_negation("shouldn't"));
        assert!(!lexicon.is_negation("note"));
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("hands-on".to_string(), 1.4);
        overrides.insert("Boring".to_string(), -3.0);

        let lexicon = SentimentLexicon::with_overrides(&overrides).unwrap();
        assert_eq!(lexicon.valence("hands-on"), Some(1.4));
        assert_eq!(lexicon.valence("boring"), Some(-3.0));
    }

    #[test]
    fn test_override_out_of_range_rejected() {
        let mut lexicon = SentimentLexicon::builtin();
        assert!(lexicon.insert("stellar", 9.0).is_err());
        assert!(lexicon.insert("stellar", f64::NAN).is_err());
        assert!(lexicon.insert("  ", 1.0).is_err());
    }
}
