//! JSON Lines mood log on the local filesystem
//!
//! One `CheckInEntry` per line. Appends go through `O_APPEND` under an
//! exclusive advisory lock and are fsynced before returning. A failed append
//! truncates the file back to its previous length, and a tail left without a
//! newline by a crash is closed off before the next entry is written.

use crate::error::StoreError;
use crate::store::MoodLog;
use crate::types::CheckInEntry;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// File-backed mood log
#[derive(Debug)]
pub struct FileMoodLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileMoodLog {
    /// Open a log at `path`. The file is created lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    fn open_for_append(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Make a newly created log file's directory entry durable
    fn sync_parent_dir(&self) -> Result<(), StoreError> {
        let parent = self.parent_dir().unwrap_or_else(|| Path::new("."));
        sync_dir(parent).map_err(|e| StoreError::io(parent, e))
    }

    fn append_locked(&self, file: &mut File, line: &[u8]) -> Result<(), StoreError> {
        file.lock_exclusive()
            .map_err(|e| StoreError::io(&self.path, e))?;

        let written = append_line(file, line);
        let unlocked = FileExt::unlock(&*file);

        written.map_err(|e| StoreError::io(&self.path, e))?;
        unlocked.map_err(|e| StoreError::io(&self.path, e))
    }

    fn parse_lines(&self, file: &File) -> Result<Vec<CheckInEntry>, StoreError> {
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line.map_err(|e| StoreError::io(&self.path, e))?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            // invalid UTF-8 surfaces here as a JSON error, with its line number
            let entry = serde_json::from_slice(&line).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

impl MoodLog for FileMoodLog {
    fn append(&self, entry: &CheckInEntry) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock();
        let created = !self.path.exists();
        let mut file = self.open_for_append()?;

        self.append_locked(&mut file, &line)?;
        if created {
            self.sync_parent_dir()?;
        }

        debug!(path = %self.path.display(), label = %entry.label, "appended check-in");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<CheckInEntry>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        file.lock_shared()
            .map_err(|e| StoreError::io(&self.path, e))?;
        let parsed = self.parse_lines(&file);
        let unlocked = FileExt::unlock(&file);

        let entries = parsed?;
        unlocked.map_err(|e| StoreError::io(&self.path, e))?;
        Ok(entries)
    }
}

/// The file operations an append needs, so the rollback path can be exercised
/// against a writer that fails part way.
trait LogFile: Write {
    fn byte_len(&self) -> io::Result<u64>;
    fn last_byte(&mut self) -> io::Result<Option<u8>>;
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
    fn sync(&mut self) -> io::Result<()>;
}

impl LogFile for File {
    fn byte_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn last_byte(&mut self) -> io::Result<Option<u8>> {
        let len = self.byte_len()?;
        if len == 0 {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        self.seek(SeekFrom::Start(len - 1))?;
        self.read_exact(&mut byte)?;
        Ok(Some(byte[0]))
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Write `line` at the end of `file` and sync it. On failure the file is cut
/// back to its previous length so no partial line is left behind.
fn append_line<F: LogFile>(file: &mut F, line: &[u8]) -> io::Result<()> {
    let previous_len = file.byte_len()?;

    let mut bytes = Vec::with_capacity(line.len() + 1);
    if previous_len > 0 && file.last_byte()? != Some(b'\n') {
        warn!("mood log ends mid-line; starting the next entry on a new line");
        bytes.push(b'\n');
    }
    bytes.extend_from_slice(line);

    let written = file.write_all(&bytes).and_then(|_| file.sync());
    if let Err(e) = written {
        if let Err(rollback) = file.truncate_to(previous_len).and_then(|_| file.sync()) {
            error!(error = %rollback, "could not roll back a failed mood log append");
        }
        return Err(e);
    }

    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
