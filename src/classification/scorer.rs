//! Offline polarity scoring.
//!
//! [`LexiconScorer`] computes a compound polarity in [-1, 1] from lexicon
//! valences adjusted by boosters, negation, capitalization, contrast and
//! punctuation, then squashes the sum with `s / sqrt(s^2 + alpha)`.

use super::lexicon::SentimentLexicon;
use tracing::trace;

/// Scalar applied to a valence preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;

/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text
const CAPS_INCREMENT: f64 = 0.733;

/// Normalization constant approximating the max expected sum
const NORMALIZATION_ALPHA: f64 = 15.0;

const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// How many preceding tokens boosters and negations reach
const LOOKBACK: usize = 3;

/// Maps text to a polarity score in [-1, 1]
///
/// Implementations must be deterministic, offline, and must not panic on
/// any input (including the empty string).
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Rule-based scorer over a [`SentimentLexicon`]
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: SentimentLexicon,
}

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl LexiconScorer {
    pub fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &SentimentLexicon {
        &self.lexicon
    }

    fn token_valence(&self, tokens: &[Token<'_>], i: usize, mixed_case: bool) -> f64 {
        let token = &tokens[i];

        // Boosters modify their neighbours and carry no sentiment themselves
        if self.lexicon.booster(&token.lower).is_some() {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };

        if mixed_case && is_shouting(token.raw) {
            valence += CAPS_INCREMENT * valence.signum();
        }

        let mut negated = false;
        for distance in 1..=LOOKBACK.min(i) {
            let prev = &tokens[i - distance];

            if let Some(scalar) = self.lexicon.booster(&prev.lower) {
                let mut adjustment = scalar * valence.signum();
                if mixed_case && is_shouting(prev.raw) {
                    adjustment += CAPS_INCREMENT * adjustment.signum();
                }
                adjustment *= match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += adjustment;
            }

            if self.lexicon.is_negation(&prev.lower) {
                negated = true;
            }
        }

        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mixed_case = is_mixed_case(&tokens);
        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|i| self.token_valence(&tokens, i, mixed_case))
            .collect();

        apply_contrast(&tokens, &mut sentiments);

        let mut sum: f64 = sentiments.iter().sum();
        if sum != 0.0 {
            let emphasis = punctuation_emphasis(text);
            sum += emphasis * sum.signum();
        }

        let compound = normalize(sum);
        trace!("Scored {} tokens: sum={:.3} compound={:.4}", tokens.len(), sum, compound);
        compound
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| word.chars().count() > 1)
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

fn is_shouting(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Capitalization only signals emphasis when the text is not all caps
fn is_mixed_case(tokens: &[Token<'_>]) -> bool {
    let shouting = tokens.iter().filter(|t| is_shouting(t.raw)).count();
    shouting > 0 && shouting < tokens.len()
}

/// Sentiment after "but" dominates sentiment before it
fn apply_contrast(tokens: &[Token<'_>], sentiments: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < pivot {
            *sentiment *= 0.5;
        } else if i > pivot {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };

    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn normalize(sum: f64) -> f64 {
    let compound = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    compound.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::default()
    }

    #[test]
    fn test_empty_and_neutral_text() {
        assert_eq!(scorer().score(""), 0.0);
        assert_eq!(scorer().score("   \n\t "), 0.0);
        assert_eq!(scorer().score("Please add more examples on lifetimes"), 0.0);
        assert_eq!(scorer().score("42"), 0.0);
    }

    #[test]
    fn test_positive_text() {
        let score = scorer().score("Great session!");
        assert!(score >= 0.3, "got {}", score);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_negative_text() {
        let score = scorer().score("The trainer was terrible and the pace was boring");
        assert!(score <= -0.2, "got {}", score);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = scorer().score("the session was helpful");
        let negated = scorer().score("the session was not helpful");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_contraction_negation() {
        assert!(scorer().score("the labs weren't useful") < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let plain = scorer().score("the session was helpful");
        let boosted = scorer().score("the session was very helpful");
        let dampened = scorer().score("the session was slightly helpful");
        assert!(boosted > plain);
        assert!(dampened < plain);
    }

    #[test]
    fn test_caps_emphasis_in_mixed_case() {
        let plain = scorer().score("the session was great");
        let shouted = scorer().score("the session was GREAT");
        assert!(shouted > plain);
    }

    #[test]
    fn test_contrast_weights_second_clause() {
        let score = scorer().score("The slides were good but the exercises were terrible");
        assert!(score < 0.0, "got {}", score);
    }

    #[test]
    fn test_exclamation_emphasis() {
        let plain = scorer().score("good session");
        let excited = scorer().score("good session!!!");
        assert!(excited > plain);
    }

    #[test]
    fn test_score_bounds() {
        let gushing = "great ".repeat(200);
        let score = scorer().score(&gushing);
        assert!(score <= 1.0 && score > 0.99);

        let scathing = "terrible awful worst ".repeat(200);
        let score = scorer().score(&scathing);
        assert!(score >= -1.0 && score < -0.99);
    }

    #[test]
    fn test_custom_lexicon() {
        let mut lexicon = SentimentLexicon::builtin();
        lexicon.insert("rustacean", 2.0).unwrap();
        let scorer = LexiconScorer::new(lexicon);
        assert!(scorer.score("a true rustacean") > 0.3);
    }
}
