//! Mood summaries
//!
//! Aggregates a mood log into the figures a dashboard shows: per-label counts,
//! a trend line and the most recent entries.

use crate::types::{CheckInEntry, MoodLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of entries kept in `MoodSummary::recent`
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Number of entries per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
    pub red_flag: usize,
}

impl LabelCounts {
    pub fn record(&mut self, label: MoodLabel) {
        *self.slot(label) += 1;
    }

    pub fn get(&self, label: MoodLabel) -> usize {
        match label {
            MoodLabel::Negative => self.negative,
            MoodLabel::Neutral => self.neutral,
            MoodLabel::Positive => self.positive,
            MoodLabel::RedFlag => self.red_flag,
        }
    }

    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive + self.red_flag
    }

    fn slot(&mut self, label: MoodLabel) -> &mut usize {
        match label {
            MoodLabel::Negative => &mut self.negative,
            MoodLabel::Neutral => &mut self.neutral,
            MoodLabel::Positive => &mut self.positive,
            MoodLabel::RedFlag => &mut self.red_flag,
        }
    }
}

/// One point on the mood trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    /// -1 negative, 0 neutral or red flag, +1 positive
    pub value: i8,
}

/// Dashboard view of a mood log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub total: usize,
    pub counts: LabelCounts,
    pub trend: Vec<TrendPoint>,
    /// Mean of the trend values, None for an empty log
    pub mean_mood: Option<f64>,
    pub first_at: Option<DateTime<Utc>>,
    pub last_at: Option<DateTime<Utc>>,
    /// Last `recent_limit` entries, oldest first
    pub recent: Vec<CheckInEntry>,
}

impl MoodSummary {
    /// Summarize entries given in log order
    pub fn from_entries(entries: &[CheckInEntry], recent_limit: usize) -> Self {
        let mut counts = LabelCounts::default();
        let trend: Vec<TrendPoint> = entries
            .iter()
            .map(|e| {
                counts.record(e.label);
                TrendPoint {
                    timestamp: e.timestamp,
                    value: e.label.trend_value(),
                }
            })
            .collect();

        let mean_mood = if trend.is_empty() {
            None
        } else {
            let sum: i64 = trend.iter().map(|p| p.value as i64).sum();
            Some(sum as f64 / trend.len() as f64)
        };

        let skip = entries.len().saturating_sub(recent_limit);

        Self {
            total: entries.len(),
            counts,
            trend,
            mean_mood,
            first_at: entries.first().map(|e| e.timestamp),
            last_at: entries.last().map(|e| e.timestamp),
            recent: entries[skip..].to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
