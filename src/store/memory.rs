//! In-memory mood log

use crate::error::StoreError;
use crate::store::MoodLog;
use crate::types::CheckInEntry;
use parking_lot::RwLock;

/// Mood log held in process memory. Entries live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryMoodLog {
    entries: RwLock<Vec<CheckInEntry>>,
}

impl MemoryMoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log with existing entries, oldest first
    pub fn with_entries(entries: Vec<CheckInEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl MoodLog for MemoryMoodLog {
    fn append(&self, entry: &CheckInEntry) -> Result<(), StoreError> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<CheckInEntry>, StoreError> {
        Ok(self.entries.read().clone())
    }
}
