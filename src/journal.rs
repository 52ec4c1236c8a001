//! Check-in orchestration
//!
//! This module provides the public API for MindMate. It runs a check-in through
//! the full pipeline from raw text to a persisted log entry.

use crate::clock::{Clock, SystemClock};
use crate::config::JournalConfig;
use crate::error::JournalError;
use crate::lexicon;
use crate::red_flag;
use crate::report::MoodReport;
use crate::response::{respond, Response};
use crate::store::{FileMoodLog, MoodLog};
use crate::summary::MoodSummary;
use crate::types::{CheckInEntry, CheckInResult, MoodLabel, Sentiment};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

/// Outcome of classifying a single check-in, before anything is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub label: MoodLabel,
    /// Crisis phrase that forced the red-flag label, if any
    pub crisis_phrase: Option<&'static str>,
    /// Lexicon score; zero when the lexicon was bypassed
    pub score: i32,
    pub response: Response,
}

/// Classify check-in text without touching the mood log.
///
/// Pipeline stages:
/// 1. Reject empty or whitespace-only text
/// 2. Red-flag detection (short-circuits classification)
/// 3. Lexicon classification
/// 4. Canned response for the resulting label
pub fn analyze_text(text: &str) -> Result<Analysis, JournalError> {
    if text.trim().is_empty() {
        return Err(JournalError::EmptyInput);
    }

    if let Some(phrase) = red_flag::matched_phrase(text) {
        return Ok(Analysis {
            label: MoodLabel::RedFlag,
            crisis_phrase: Some(phrase),
            score: 0,
            response: respond(MoodLabel::RedFlag),
        });
    }

    let score = lexicon::score(text);
    let label = MoodLabel::from(Sentiment::from_score(score));

    Ok(Analysis {
        label,
        crisis_phrase: None,
        score,
        response: respond(label),
    })
}

/// Single owner of a mood log. Front-ends share one journal instead of
/// touching the log directly.
pub struct MoodJournal<L: MoodLog = FileMoodLog, C: Clock = SystemClock> {
    log: L,
    clock: C,
    /// Timestamp of the last successful append; held across stamp + append
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl MoodJournal<FileMoodLog, SystemClock> {
    /// Open the file-backed journal described by `config`
    pub fn open(config: &JournalConfig) -> Self {
        Self::new(FileMoodLog::new(config.log_path.clone()), SystemClock)
    }
}

impl<L: MoodLog, C: Clock> MoodJournal<L, C> {
    pub fn new(log: L, clock: C) -> Self {
        Self {
            log,
            clock,
            last_stamp: Mutex::new(None),
        }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Submit a check-in.
    ///
    /// The entry is appended exactly once, after classification and before the
    /// result is returned. A crisis result is returned even when the append
    /// fails; `persisted` is false in that case.
    pub fn check_in(&self, text: &str) -> Result<CheckInResult, JournalError> {
        let analysis = analyze_text(text)?;

        if let Some(phrase) = analysis.crisis_phrase {
            warn!(phrase, "red flag detected in check-in");
        } else {
            debug!(label = %analysis.label, score = analysis.score, "classified check-in");
        }

        let mut last_stamp = self.last_stamp.lock();
        let now = self.clock.now();
        let timestamp = match *last_stamp {
            Some(previous) if now < previous => previous,
            _ => now,
        };

        let entry = CheckInEntry::new(timestamp, text, analysis.label);
        let persisted = match self.log.append(&entry) {
            Ok(()) => {
                *last_stamp = Some(timestamp);
                true
            }
            Err(e) if analysis.label.is_crisis() => {
                error!(error = %e, "crisis check-in could not be persisted");
                false
            }
            Err(e) => {
                error!(error = %e, "check-in could not be persisted");
                return Err(e.into());
            }
        };

        Ok(CheckInResult {
            label: analysis.label,
            message: analysis.response.message.to_string(),
            is_crisis: analysis.response.is_crisis,
            persisted,
        })
    }

    /// Every entry in the log, in append order
    pub fn history(&self) -> Result<Vec<CheckInEntry>, JournalError> {
        Ok(self.log.read_all()?)
    }

    /// Dashboard summary of the whole log
    pub fn summary(&self, recent_limit: usize) -> Result<MoodSummary, JournalError> {
        let entries = self.history()?;
        Ok(MoodSummary::from_entries(&entries, recent_limit))
    }

    /// Export the whole log under `title`
    pub fn report(&self, title: &str) -> Result<MoodReport, JournalError> {
        let entries = self.history()?;
        Ok(MoodReport::build(title, entries, self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::StoreError;
    use crate::response::CRISIS_RESOURCES_URL;
    use crate::store::MemoryMoodLog;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use std::io;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    fn journal() -> MoodJournal<MemoryMoodLog, FixedClock> {
        MoodJournal::new(MemoryMoodLog::new(), FixedClock::new(start()))
    }

    /// Log whose appends always fail
    struct BrokenLog;

    impl MoodLog for BrokenLog {
        fn append(&self, _entry: &CheckInEntry) -> Result<(), StoreError> {
            Err(StoreError::io(
                "/dev/full",
                io::Error::new(io::ErrorKind::Other, "no space left on device"),
            ))
        }

        fn read_all(&self) -> Result<Vec<CheckInEntry>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_positive_check_in() {
        let journal = journal();
        let result = journal.check_in("I feel happy and good today").unwrap();

        assert_eq!(result.label, MoodLabel::Positive);
        assert!(!result.is_crisis);
        assert!(result.persisted);
    }

    #[test]
    fn test_negative_check_in() {
        let journal = journal();
        let result = journal.check_in("I am stressed and anxious").unwrap();
        assert_eq!(result.label, MoodLabel::Negative);
        assert!(result.message.contains("grounding"));
    }

    #[test]
    fn test_tie_check_in_is_neutral() {
        let journal = journal();
        let result = journal.check_in("I feel fine and a bit stressed").unwrap();
        assert_eq!(result.label, MoodLabel::Neutral);
    }

    #[test]
    fn test_red_flag_overrides_lexicon() {
        let journal = journal();

        let result = journal.check_in("I want to kill myself").unwrap();
        assert_eq!(result.label, MoodLabel::RedFlag);
        assert!(result.is_crisis);
        assert!(result.message.contains(CRISIS_RESOURCES_URL));

        // positive words cannot outvote a crisis phrase
        let result = journal
            .check_in("Everything is great and good and fine, but suicide is on my mind")
            .unwrap();
        assert_eq!(result.label, MoodLabel::RedFlag);

        let labels: Vec<_> = journal.history().unwrap().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![MoodLabel::RedFlag, MoodLabel::RedFlag]);
    }

    #[test]
    fn test_empty_input_is_not_logged() {
        let journal = journal();

        for text in ["", "   ", "\n\t "] {
            assert!(matches!(journal.check_in(text), Err(JournalError::EmptyInput)));
        }
        assert!(journal.log().is_empty());
    }

    #[test]
    fn test_entries_stored_verbatim_in_call_order() {
        let journal = journal();
        let texts = ["  Good morning ", "sad", "nothing much", "I want to die"];

        for text in texts {
            journal.check_in(text).unwrap();
            journal.clock().advance(Duration::minutes(1));
        }

        let history = journal.history().unwrap();
        assert_eq!(history.len(), texts.len());
        let stored: Vec<&str> = history.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(stored, texts.to_vec());
        assert_eq!(history[0].timestamp, start());
        assert_eq!(history[3].timestamp, start() + Duration::minutes(3));
    }

    #[test]
    fn test_result_matches_logged_entry() {
        let journal = journal();
        let result = journal.check_in("feeling better, relieved").unwrap();
        let history = journal.history().unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].label, result.label);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let journal = journal();
        journal.clock().advance(Duration::hours(1));
        journal.check_in("ok").unwrap();

        journal.clock().set(start());
        journal.check_in("ok again").unwrap();

        let history = journal.history().unwrap();
        assert_eq!(history[0].timestamp, start() + Duration::hours(1));
        assert_eq!(history[1].timestamp, history[0].timestamp);
    }

    #[test]
    fn test_crisis_reply_survives_store_failure() {
        let journal = MoodJournal::new(BrokenLog, FixedClock::new(start()));

        let result = journal.check_in("i want to end it all").unwrap();
        assert_eq!(result.label, MoodLabel::RedFlag);
        assert!(result.is_crisis);
        assert!(!result.persisted);
    }

    #[test]
    fn test_store_failure_surfaces_for_normal_check_in() {
        let journal = MoodJournal::new(BrokenLog, FixedClock::new(start()));

        let result = journal.check_in("I feel happy");
        assert!(matches!(result, Err(JournalError::Store(StoreError::Io { .. }))));
    }

    #[test]
    fn test_analyze_text_reports_details() {
        let analysis = analyze_text("I feel happy and good today").unwrap();
        assert_eq!(analysis.label, MoodLabel::Positive);
        assert_eq!(analysis.score, 2);
        assert_eq!(analysis.crisis_phrase, None);

        let analysis = analyze_text("I don't want to live like this").unwrap();
        assert_eq!(analysis.label, MoodLabel::RedFlag);
        assert_eq!(analysis.crisis_phrase, Some("i don't want to live"));
    }

    #[test]
    fn test_summary_and_report() {
        let journal = journal();
        journal.check_in("happy").unwrap();
        journal.check_in("hopeless").unwrap();
        journal.check_in("kill myself").unwrap();

        let summary = journal.summary(2).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts.red_flag, 1);
        assert_eq!(summary.recent.len(), 2);

        let report = journal.report("weekly").unwrap();
        assert_eq!(report.entries, journal.history().unwrap());
        assert_eq!(report.generated_at, start());
    }

    #[test]
    fn test_check_in_appends_after_existing_history() {
        let earlier = CheckInEntry::new(
            start() - Duration::days(1),
            "tired",
            MoodLabel::Negative,
        );
        let journal = MoodJournal::new(
            MemoryMoodLog::with_entries(vec![earlier.clone()]),
            FixedClock::new(start()),
        );

        journal.check_in("good").unwrap();

        let history = journal.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], earlier);
        assert_eq!(history[1].text, "good");
        assert_eq!(journal.summary(10).unwrap().counts.negative, 1);
    }

    #[test]
    fn test_file_backed_journal_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig {
            log_path: dir.path().join("mood_logs.jsonl"),
            ..JournalConfig::default()
        };

        let journal = MoodJournal::open(&config);
        journal.check_in("I feel happy and good today").unwrap();
        journal.check_in("I am stressed and anxious").unwrap();

        let reopened = MoodJournal::open(&config);
        let labels: Vec<_> = reopened.history().unwrap().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![MoodLabel::Positive, MoodLabel::Negative]);
        assert_eq!(reopened.history().unwrap(), reopened.history().unwrap());
    }
}
