//! Mood report export
//!
//! Packs a mood log and its summary into a single self-describing JSON
//! document that downstream tooling (notebooks, spreadsheets) can load.

use crate::error::JournalError;
use crate::summary::{MoodSummary, DEFAULT_RECENT_LIMIT};
use crate::types::CheckInEntry;
use crate::{MINDMATE_VERSION, PRODUCER_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File stem used when a title has no usable characters
pub const FALLBACK_FILE_STEM: &str = "report";

/// Report producer metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
}

/// Exported mood report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReport {
    pub report_id: Uuid,
    pub title: String,
    pub file_stem: String,
    pub producer: ReportProducer,
    pub generated_at: DateTime<Utc>,
    pub summary: MoodSummary,
    pub entries: Vec<CheckInEntry>,
}

impl MoodReport {
    /// Build a report over `entries`, given in log order
    pub fn build(title: &str, entries: Vec<CheckInEntry>, generated_at: DateTime<Utc>) -> Self {
        let summary = MoodSummary::from_entries(&entries, DEFAULT_RECENT_LIMIT);

        Self {
            report_id: Uuid::new_v4(),
            title: title.to_string(),
            file_stem: safe_file_stem(title),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: MINDMATE_VERSION.to_string(),
            },
            generated_at,
            summary,
            entries,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.file_stem)
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        serde_json::to_string_pretty(self).map_err(JournalError::ReportEncode)
    }

    /// Write the report as `<dir>/<file_stem>.json`, replacing any previous export
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, JournalError> {
        let json = self.to_json()?;
        let path = dir.join(self.file_name());

        fs::create_dir_all(dir).map_err(|source| JournalError::ReportWrite {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| JournalError::ReportWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Turn a free-form title into a file stem: ASCII alphanumerics, `-` and `_`
/// are kept, everything else becomes `_`.
pub fn safe_file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.chars().all(|c| c == '_') {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoodLabel;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_entries() -> Vec<CheckInEntry> {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        vec![
            CheckInEntry::new(ts, "I feel happy and good today", MoodLabel::Positive),
            CheckInEntry::new(ts, "I am stressed and anxious", MoodLabel::Negative),
        ]
    }

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("student_stress_demo"), "student_stress_demo");
        assert_eq!(safe_file_stem("My Week: Jan/Feb"), "My_Week__Jan_Feb");
        assert_eq!(safe_file_stem("../../etc/passwd"), "______etc_passwd");
        assert_eq!(safe_file_stem("  spaced  "), "spaced");
        assert_eq!(safe_file_stem("日記"), FALLBACK_FILE_STEM);
        assert_eq!(safe_file_stem(""), FALLBACK_FILE_STEM);
    }

    #[test]
    fn test_build_report() {
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        let report = MoodReport::build("Student stress demo", sample_entries(), generated_at);

        assert_eq!(report.file_stem, "Student_stress_demo");
        assert_eq!(report.file_name(), "Student_stress_demo.json");
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.counts.positive, 1);
        assert_eq!(report.summary.counts.negative, 1);
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        let report = MoodReport::build("demo", sample_entries(), generated_at);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["title"], "demo");
        assert_eq!(value["producer"]["name"], "mindmate");
        assert_eq!(value["generated_at"], "2024-01-16T00:00:00Z");
        assert_eq!(value["entries"][1]["label"], "negative");
        assert_eq!(value["summary"]["counts"]["positive"], 1);
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("exports");
        let report = MoodReport::build("weekly review", sample_entries(), Utc::now());

        let path = report.write_to_dir(&out_dir).unwrap();
        assert_eq!(path, out_dir.join("weekly_review.json"));

        let loaded: MoodReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}
