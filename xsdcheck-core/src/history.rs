//! Recently validated inputs.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

/// Errors raised by a [`HistoryStore`].
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available for the history file")]
    NoDataDir,
}

/// A list of previously validated inputs, most recent first, without duplicates.
pub trait HistoryStore: Send + Sync {
    fn entries(&self) -> Result<Vec<String>, HistoryError>;

    /// Put `item` at the front of the history unless it is already present.
    fn record(&self, item: &str) -> Result<(), HistoryError>;

    fn clear(&self) -> Result<(), HistoryError>;
}

fn insert_front(entries: &mut Vec<String>, item: &str) -> bool {
    if entries.iter().any(|entry| entry == item) {
        debug!(item, "duplicate history entry");
        return false;
    }
    entries.insert(0, item.to_string());
    true
}

/// History kept as a JSON array in a file.
#[derive(Debug)]
pub struct FileHistory {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// History stored at `<data dir>/xsdcheck/history.json`.
    ///
    /// # Errors
    /// Returns [`HistoryError::NoDataDir`] when the platform has no data directory.
    pub fn open_default() -> Result<Self, HistoryError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf, HistoryError> {
        dirs::data_dir()
            .map(|dir| dir.join("xsdcheck").join("history.json"))
            .ok_or(HistoryError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // A missing or unreadable file is an empty history.
    fn load(&self) -> Vec<String> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no history available");
            return Vec::new();
        }
        let loaded = std::fs::read_to_string(&self.path)
            .map_err(HistoryError::from)
            .and_then(|content| serde_json::from_str(&content).map_err(HistoryError::from));
        match loaded {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring unreadable history");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        debug!(path = %self.path.display(), count = entries.len(), "saved history");
        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn entries(&self) -> Result<Vec<String>, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(self.load())
    }

    fn record(&self, item: &str) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = self.load();
        if insert_front(&mut entries, item) {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.save(&[])
    }
}

/// In-process history, for embedders and tests.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<String>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn entries(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn record(&self, item: &str) -> Result<(), HistoryError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        insert_front(&mut entries, item);
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_history_orders_most_recent_first() {
        let history = MemoryHistory::new();
        history.record("a.xml").unwrap();
        history.record("b.xml").unwrap();
        history.record("a.xml").unwrap();
        assert_eq!(history.entries().unwrap(), vec!["b.xml", "a.xml"]);
        history.clear().unwrap();
        assert!(history.entries().unwrap().is_empty());
    }

    #[test]
    fn file_history_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("history.json");

        let history = FileHistory::new(&path);
        assert!(history.entries().unwrap().is_empty());
        history.record("http://example.com/a.xml").unwrap();
        history.record("b.xml").unwrap();
        history.record("b.xml").unwrap();

        let reopened = FileHistory::new(&path);
        assert_eq!(
            reopened.entries().unwrap(),
            vec!["b.xml", "http://example.com/a.xml"]
        );

        reopened.clear().unwrap();
        assert!(history.entries().unwrap().is_empty());
    }

    #[test]
    fn corrupt_history_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();

        let history = FileHistory::new(&path);
        assert!(history.entries().unwrap().is_empty());
        history.record("a.xml").unwrap();
        assert_eq!(history.entries().unwrap(), vec!["a.xml"]);
    }
}
