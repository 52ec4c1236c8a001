//! Lexicon-based mood classification
//!
//! Scores text against two fixed word sets. Matching is plain substring
//! containment on the lower-cased text, so "ok" also fires inside "okay" or
//! "book". Each lexicon word contributes at most once, however often it occurs.

use crate::types::Sentiment;

/// Words that pull the score down by one when present
pub const NEGATIVE_WORDS: &[&str] = &[
    "stressed",
    "anxious",
    "anxiety",
    "depressed",
    "sad",
    "suicide",
    "suicidal",
    "hurt",
    "kill myself",
    "dont want to live",
    "overwhelmed",
    "hopeless",
];

/// Words that push the score up by one when present
pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "good", "well", "great", "relieved", "better", "ok", "okay", "fine", "improved",
];

/// Lexicon words found in a piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconMatches {
    pub negative: Vec<&'static str>,
    pub positive: Vec<&'static str>,
}

impl LexiconMatches {
    pub fn score(&self) -> i32 {
        self.positive.len() as i32 - self.negative.len() as i32
    }
}

/// Collect every lexicon word contained in `text`
pub fn matches(text: &str) -> LexiconMatches {
    let lowered = text.to_lowercase();
    let found = |words: &[&'static str]| -> Vec<&'static str> {
        words
            .iter()
            .copied()
            .filter(|w| lowered.contains(w))
            .collect()
    };

    LexiconMatches {
        negative: found(NEGATIVE_WORDS),
        positive: found(POSITIVE_WORDS),
    }
}

/// Raw lexicon score: positive matches minus negative matches
pub fn score(text: &str) -> i32 {
    matches(text).score()
}

/// Classify text into a coarse sentiment
pub fn classify(text: &str) -> Sentiment {
    Sentiment::from_score(score(text))
}
