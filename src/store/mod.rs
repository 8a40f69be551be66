//! Storage collaborators for scraped records.
//!
//! The extractor hands finished records to a [`RateStore`]; what sits behind
//! the trait is the caller's business. The crate ships an append-only
//! JSON-lines file store and an in-memory store.

use crate::powersetter::RateRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write record: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Insert API for scraped records.
pub trait RateStore: Send {
    /// Persists a batch of records.
    fn insert(&mut self, records: &[RateRecord]) -> Result<(), StoreError>;
}

/// Append-only JSON-lines file store, one record per line.
pub struct JsonlStore {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl JsonlStore {
    /// Opens the file for appending, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Open { path: path.clone(), source })?;

        Ok(Self { writer: BufWriter::new(file), path })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateStore for JsonlStore {
    fn insert(&mut self, records: &[RateRecord]) -> Result<(), StoreError> {
        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;

        debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// In-memory store, mainly for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<RateRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored records.
    pub fn records(&self) -> &[RateRecord] {
        &self.records
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RateStore for MemoryStore {
    fn insert(&mut self, records: &[RateRecord]) -> Result<(), StoreError> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_record(zip: &str, price: f64) -> RateRecord {
        RateRecord {
            zip_code: zip.to_string(),
            price_per_kwh: price,
            savings: String::new(),
            terms: "12 months".to_string(),
            info: String::new(),
            green: "N".to_string(),
            supplier_logo_url: String::new(),
            signup_url: String::new(),
            utility: "ComEd".to_string(),
            fee: String::new(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.insert(&[make_record("60021", 9.85), make_record("60021", 10.5)]).unwrap();
        store.insert(&[make_record("19122", 11.2)]).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[0].zip_code, "60021");
        assert_eq!(store.records()[2].zip_code, "19122");
    }

    #[test]
    fn test_jsonl_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.jsonl");

        let mut store = JsonlStore::open(&path).unwrap();
        store.insert(&[make_record("60021", 9.85)]).unwrap();
        store.insert(&[make_record("19122", 11.2)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: RateRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.zip_code, "60021");
        assert_eq!(first.price_per_kwh, 9.85);

        let second: RateRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.zip_code, "19122");
    }

    #[test]
    fn test_jsonl_store_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.jsonl");

        {
            let mut store = JsonlStore::open(&path).unwrap();
            store.insert(&[make_record("60021", 9.85)]).unwrap();
        }
        {
            let mut store = JsonlStore::open(&path).unwrap();
            store.insert(&[make_record("19122", 11.2)]).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_jsonl_store_open_error() {
        let result = JsonlStore::open("/nonexistent-dir/rates.jsonl");
        assert!(result.is_err());
        let err = result.err().unwrap().to_string();
        assert!(err.contains("failed to open store file"));
    }

    #[test]
    fn test_jsonl_store_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.jsonl");

        let store = JsonlStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
    }
}
