//! Core types for the MindMate journal
//!
//! This module defines the data structures that flow through the check-in
//! pipeline: sentiment, mood labels, persisted entries and check-in results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexicon classifier output. Never carries a crisis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Map a raw lexicon score to a sentiment
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s < 0 => Sentiment::Negative,
            s if s > 0 => Sentiment::Positive,
            _ => Sentiment::Neutral,
        }
    }
}

/// Mood label persisted with every check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Negative,
    Neutral,
    Positive,
    RedFlag,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 4] = [
        MoodLabel::Negative,
        MoodLabel::Neutral,
        MoodLabel::Positive,
        MoodLabel::RedFlag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Negative => "negative",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Positive => "positive",
            MoodLabel::RedFlag => "red_flag",
        }
    }

    /// Value plotted on the mood trend line. Crisis entries sit at zero.
    pub fn trend_value(&self) -> i8 {
        match self {
            MoodLabel::Negative => -1,
            MoodLabel::Positive => 1,
            MoodLabel::Neutral | MoodLabel::RedFlag => 0,
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, MoodLabel::RedFlag)
    }
}

impl From<Sentiment> for MoodLabel {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Negative => MoodLabel::Negative,
            Sentiment::Neutral => MoodLabel::Neutral,
            Sentiment::Positive => MoodLabel::Positive,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single persisted check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInEntry {
    /// Append time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Raw user text, stored verbatim
    pub text: String,
    pub label: MoodLabel,
}

impl CheckInEntry {
    pub fn new(timestamp: DateTime<Utc>, text: impl Into<String>, label: MoodLabel) -> Self {
        Self {
            timestamp,
            text: text.into(),
            label,
        }
    }
}

/// Result handed back to the caller of a check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInResult {
    pub label: MoodLabel,
    pub message: String,
    pub is_crisis: bool,
    /// False only when a crisis entry could not be written to the log
    pub persisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sentiment_from_score() {
        assert_eq!(Sentiment::from_score(-3), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(2), Sentiment::Positive);
    }

    #[test]
    fn test_label_serializes_snake_case() {
        let json = serde_json::to_string(&MoodLabel::RedFlag).unwrap();
        assert_eq!(json, "\"red_flag\"");

        let label: MoodLabel = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(label, MoodLabel::Neutral);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let result: Result<MoodLabel, _> = serde_json::from_str("\"ecstatic\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_trend_values() {
        assert_eq!(MoodLabel::Negative.trend_value(), -1);
        assert_eq!(MoodLabel::Neutral.trend_value(), 0);
        assert_eq!(MoodLabel::Positive.trend_value(), 1);
        assert_eq!(MoodLabel::RedFlag.trend_value(), 0);
    }

    #[test]
    fn test_entry_json_shape() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let entry = CheckInEntry::new(ts, "feeling ok", MoodLabel::Positive);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["timestamp"], "2024-01-15T09:30:00Z");
        assert_eq!(value["text"], "feeling ok");
        assert_eq!(value["label"], "positive");
    }
}
