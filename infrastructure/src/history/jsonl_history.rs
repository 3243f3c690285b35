//! JSONL file store for completed research runs.
//!
//! Each [`HistoryRecord`] is serialized as a single JSON line and appended
//! to the file. Existing records are never rewritten.

use scribe_application::ports::research_history::{HistoryError, HistoryRecord, ResearchHistory};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Append-only JSONL research history.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record.
pub struct JsonlResearchHistory {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlResearchHistory {
    /// Open (or create) the history file at `path`.
    ///
    /// Creates parent directories if needed. Returns `None` if the file
    /// cannot be opened for appending.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create history directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResearchHistory for JsonlResearchHistory {
    fn record(&self, record: HistoryRecord) {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not serialize history record: {}", e);
                return;
            }
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not write history record to {}: {}", self.path.display(), e);
            } else {
                debug!("Recorded research run {} in history", record.id);
            }
        }
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let file = File::open(&self.path).map_err(|e| HistoryError::Io(e.to_string()))?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| HistoryError::Io(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping corrupt history line {}: {}", index + 1, e),
            }
        }

        records.reverse();
        records.truncate(limit);
        Ok(records)
    }
}

impl Drop for JsonlResearchHistory {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
