//! Result storage backends.

use super::ResultRecord;
use crate::error::StoreError;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only result storage.
pub trait ResultStore {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError>;

    /// Up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<ResultRecord>, StoreError>;
}

fn newest_first(mut records: Vec<ResultRecord>, limit: usize) -> Vec<ResultRecord> {
    // stable sort keeps insertion order among equal timestamps, reversed below
    records.reverse();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records.truncate(limit);
    records
}

/// In-process store, mostly for tests and one-shot runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryResultStore {
    records: Vec<ResultRecord>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResultStore for MemoryResultStore {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ResultRecord>, StoreError> {
        Ok(newest_first(self.records.clone(), limit))
    }
}

/// One JSON object per line. A missing file reads as empty.
#[derive(Clone, Debug)]
pub struct JsonlResultStore {
    path: PathBuf,
}

impl JsonlResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlResultStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every parseable record in file order. Malformed lines are skipped.
    pub fn load_all(&self) -> Result<Vec<ResultRecord>, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<ResultRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "[Store] skipping malformed line {} in {}: {}",
                    index + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

impl ResultStore for JsonlResultStore {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        log::debug!("[Store] appended {} to {}", record.cvti, self.path.display());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ResultRecord>, StoreError> {
        Ok(newest_first(self.load_all()?, limit))
    }
}
