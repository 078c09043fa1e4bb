//! The duty store: per-day lists of free-text duties.
//!
//! The whole mapping lives in one backend record as a JSON object from
//! `YYYY-MM-DD` to arrays of strings:
//!
//! ```json
//! {"2025-10-06": ["Met supervisor", "Reviewed onboarding docs"]}
//! ```
//!
//! Every mutation re-reads that record, edits it, and writes it back while
//! holding the store's lock, so two mutations can never interleave. A day
//! present in the map always has at least one duty.
//!
//! Each date's value is read on its own. A stray value under one key lists
//! as empty for that day but is written back untouched, so it never costs
//! another day its duties.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::date::DateKey;
use crate::error::{Error, Result};
use crate::storage::Backend;

/// Record key the logbook is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "internshipLogbook";

/// Persisted shape: canonical date string to duties in display order.
pub type DutyMap = BTreeMap<String, Vec<String>>;

/// The record as stored, including values the store does not understand.
type Record = Map<String, Value>;

/// Per-day duty lists over a key-value [`Backend`].
#[derive(Debug)]
pub struct DutyStore<B> {
    backend: Mutex<B>,
    key: String,
}

impl<B: Backend> DutyStore<B> {
    /// Create a store persisting under [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store persisting under a custom record key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend: Mutex::new(backend),
            key: key.into(),
        }
    }

    /// The record key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Duties recorded for `date`, oldest first. Empty if there are none.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read. Missing or
    /// malformed data reads as an empty logbook.
    pub fn list(&self, date: DateKey) -> Result<Vec<String>> {
        let backend = self.lock()?;
        let record = self.read(&*backend)?;
        Ok(record
            .get(&date.to_string())
            .map(duties_of)
            .unwrap_or_default())
    }

    /// Append a duty to the end of `date`'s list.
    ///
    /// Surrounding whitespace is trimmed before storing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `text` is blank; nothing is written
    /// in that case. Backend failures are propagated.
    pub fn append(&self, date: DateKey, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation);
        }

        self.update(|record| {
            let day = date.to_string();
            let mut duties = record.get(&day).map(duties_of).unwrap_or_default();
            duties.push(text.to_string());
            debug!("Appended duty #{} for {}", duties.len() - 1, date);
            record.insert(day, Value::from(duties));
            Ok(())
        })
    }

    /// Remove the duty at position `index` of `date`'s list and return it.
    ///
    /// Later duties shift down by one. When the last duty of a day is
    /// removed the day disappears from the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the day has no duty at `index`;
    /// nothing is written in that case. Backend failures are propagated.
    pub fn remove_at(&self, date: DateKey, index: usize) -> Result<String> {
        self.update(|record| {
            let day = date.to_string();
            let mut duties = record.get(&day).map(duties_of).unwrap_or_default();
            if index >= duties.len() {
                return Err(Error::IndexOutOfRange {
                    date: day,
                    index,
                    len: duties.len(),
                });
            }

            let removed = duties.remove(index);
            if duties.is_empty() {
                record.remove(&day);
                debug!("Removed last duty for {}", date);
            } else {
                record.insert(day, Value::from(duties));
                debug!("Removed duty #{} for {}", index, date);
            }
            Ok(removed)
        })
    }

    /// The full mapping as currently persisted.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn snapshot(&self) -> Result<DutyMap> {
        let backend = self.lock()?;
        let record = self.read(&*backend)?;
        Ok(record
            .iter()
            .map(|(day, value)| (day.clone(), duties_of(value)))
            .filter(|(_, duties)| !duties.is_empty())
            .collect())
    }

    /// Number of days that have at least one duty.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn day_count(&self) -> Result<usize> {
        Ok(self.snapshot()?.len())
    }

    /// The raw persisted record, exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn raw(&self) -> Result<Option<String>> {
        self.lock()?.get(&self.key)
    }

    /// Run `f` against the backend while holding the lock.
    ///
    /// # Errors
    ///
    /// Returns an error if a previous holder of the lock panicked.
    pub fn inspect<T>(&self, f: impl FnOnce(&B) -> T) -> Result<T> {
        Ok(f(&*self.lock()?))
    }

    /// Give the backend back, consuming the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a previous holder of the lock panicked.
    pub fn into_backend(self) -> Result<B> {
        self.backend
            .into_inner()
            .map_err(|_| Error::internal("duty store lock poisoned"))
    }

    /// Read-modify-write of the whole map under the lock.
    ///
    /// If `f` fails, nothing is written.
    fn update<T>(&self, f: impl FnOnce(&mut Record) -> Result<T>) -> Result<T> {
        let mut backend = self.lock()?;
        let mut record = self.read(&*backend)?;
        let out = f(&mut record)?;
        let value = serde_json::to_string(&record)?;
        backend.set(&self.key, &value)?;
        Ok(out)
    }

    fn read(&self, backend: &B) -> Result<Record> {
        Ok(backend
            .get(&self.key)?
            .map(|raw| parse_record(&self.key, &raw))
            .unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, B>> {
        self.backend
            .lock()
            .map_err(|_| Error::internal("duty store lock poisoned"))
    }
}

/// Parse a persisted record. Anything that is not a JSON object reads as empty.
fn parse_record(key: &str, raw: &str) -> Record {
    let mut record = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(record)) => record,
        Ok(_) => {
            warn!("Ignoring record {}: not a JSON object", key);
            return Record::new();
        }
        Err(e) => {
            warn!("Ignoring malformed record {}: {}", key, e);
            return Record::new();
        }
    };

    let before = record.len();
    record.retain(|_, value| !matches!(value, Value::Array(items) if items.is_empty()));
    if record.len() != before {
        info!("Dropped {} empty day(s) from {}", before - record.len(), key);
    }

    for (day, value) in &record {
        match value {
            Value::Array(items) if items.iter().all(Value::is_string) => {}
            Value::Array(_) => warn!("Record {} has non-text duties on {}", key, day),
            _ => warn!("Record {} has a non-list value under {}", key, day),
        }
    }
    record
}

/// The duties stored under one day. Values other than lists read as empty.
fn duties_of(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text.clone()),
            Value::Number(_) | Value::Bool(_) => Some(item.to_string()),
            _ => None,
        })
        .collect()
}
