//! Key-value persistence for logbook.
//!
//! The duty store keeps its whole state as one JSON record. A [`Backend`]
//! only has to hold named string values; [`SqliteBackend`] does so on disk
//! and [`MemoryBackend`] in process.

pub mod migrations;
pub mod schema;
mod sqlite;

use std::collections::HashMap;

use crate::error::Result;

pub use sqlite::{SqliteBackend, StorageStats};

/// A store of named string records.
pub trait Backend: Send {
    /// Read the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend, used by tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    records: HashMap<String, String>,
    writes: usize,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend already holding one record.
    #[must_use]
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut records = HashMap::new();
        records.insert(key.into(), value.into());
        Self { records, writes: 0 }
    }

    /// Number of `set` calls made so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
