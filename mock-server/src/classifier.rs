//! Text classifiers behind the `/analyze` endpoint.
//!
//! The real backend runs a binary SST-2 model. The mock keeps the same
//! output shape (`POSITIVE`/`NEGATIVE` plus a confidence in `[0.5, 1)`)
//! using a small cue-word lexicon.

use thiserror::Error;

use crate::Sentiment;

pub const POSITIVE: &str = "POSITIVE";
pub const NEGATIVE: &str = "NEGATIVE";

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ClassifyError(pub String);

pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError>;
}

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "best", "better", "brilliant", "delight", "delightful", "enjoy", "enjoyed",
    "excellent", "fantastic", "fine", "good", "great", "happy", "helpful", "like", "liked", "love",
    "loved", "lovely", "nice", "perfect", "pleasant", "recommend", "satisfied", "superb", "thanks",
    "wonderful", "works",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry", "annoying", "awful", "bad", "boring", "broken", "bug", "crash", "disappointed",
    "disappointing", "fail", "failed", "hate", "hated", "horrible", "poor", "sad", "slow", "terrible",
    "ugly", "unhappy", "useless", "waste", "worse", "worst", "wrong",
];

const NEGATORS: &[&str] = &["not", "no", "never", "isn't", "wasn't", "don't", "doesn't", "didn't", "can't"];

/// Counts positive and negative cue words. A negator flips the polarity of
/// the word right after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    /// Returns `(positive, negative)` cue counts.
    pub fn tally(&self, text: &str) -> (u32, u32) {
        let lowered = text.to_lowercase();
        let mut positive = 0;
        let mut negative = 0;
        let mut negated = false;

        let words = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty());
        for word in words {
            let polarity = if POSITIVE_WORDS.contains(&word) {
                Some(true)
            } else if NEGATIVE_WORDS.contains(&word) {
                Some(false)
            } else {
                None
            };
            match polarity.map(|p| p != negated) {
                Some(true) => positive += 1,
                Some(false) => negative += 1,
                None => {}
            }
            negated = NEGATORS.contains(&word);
        }
        (positive, negative)
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError> {
        let (positive, negative) = self.tally(text);
        let (label, winning) = if negative > positive {
            (NEGATIVE, negative)
        } else {
            (POSITIVE, positive)
        };
        // Laplace smoothing keeps the confidence inside [0.5, 1).
        let score = f64::from(winning + 1) / f64::from(positive + negative + 2);
        Ok(Sentiment {
            label: label.to_string(),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text() {
        let s = LexiconClassifier.classify("I love this, it works great!").unwrap();
        assert_eq!(s.label, POSITIVE);
        assert!((s.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn negative_text() {
        let s = LexiconClassifier.classify("Terrible. Slow and broken.").unwrap();
        assert_eq!(s.label, NEGATIVE);
        assert!(s.score > 0.5);
    }

    #[test]
    fn negation_flips_polarity() {
        assert_eq!(LexiconClassifier.tally("this is not good"), (0, 1));
        assert_eq!(LexiconClassifier.tally("never bad"), (1, 0));
        assert_eq!(LexiconClassifier.classify("not good at all").unwrap().label, NEGATIVE);
    }

    #[test]
    fn no_cues_is_neutral_positive() {
        let s = LexiconClassifier.classify("the quick brown fox").unwrap();
        assert_eq!(s.label, POSITIVE);
        assert_eq!(s.score, 0.5);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(LexiconClassifier.tally("GREAT Awesome"), (2, 0));
    }
}
