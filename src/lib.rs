//! MindMate - Local-first mood journal
//!
//! MindMate turns free-text check-ins into coarse mood labels through a
//! deterministic pipeline: validation → red-flag detection → lexicon
//! classification → canned response → append to the mood log.
//!
//! ## Modules
//!
//! - **Engine**: `lexicon`, `red_flag` and `response` are pure functions over text
//! - **Mood Log**: `store` persists entries append-only, in call order
//! - **Journal**: `journal` composes the engine and the log behind one entry point
//! - **Exports**: `summary` and `report` aggregate the log for dashboards

pub mod clock;
pub mod config;
pub mod error;
pub mod journal;
pub mod lexicon;
pub mod red_flag;
pub mod report;
pub mod response;
pub mod store;
pub mod summary;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::JournalConfig;
pub use error::{ConfigError, JournalError, StoreError};
pub use journal::{analyze_text, Analysis, MoodJournal};
pub use report::MoodReport;
pub use store::{FileMoodLog, MemoryMoodLog, MoodLog};
pub use summary::MoodSummary;
pub use types::{CheckInEntry, CheckInResult, MoodLabel, Sentiment};

/// MindMate version embedded in exported reports
pub const MINDMATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for exported reports
pub const PRODUCER_NAME: &str = "mindmate";
