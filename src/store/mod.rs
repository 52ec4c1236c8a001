//! Append-only mood log
//!
//! A mood log is the durable, ordered record of every check-in. Backends only
//! ever add entries at the end; nothing in this crate rewrites or removes them.

mod file;
mod memory;

pub use file::FileMoodLog;
pub use memory::MemoryMoodLog;

use crate::error::StoreError;
use crate::types::CheckInEntry;

/// Trait for mood log backends
pub trait MoodLog: Send + Sync {
    /// Add `entry` as the new last element. Returns only once the entry is durable.
    fn append(&self, entry: &CheckInEntry) -> Result<(), StoreError>;

    /// All entries in append order. A log that was never written reads as empty.
    fn read_all(&self) -> Result<Vec<CheckInEntry>, StoreError>;
}
