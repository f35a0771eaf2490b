//! Generic id-keyed record collection backed by one data file.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::codec::Fields;
use crate::config::InternalConfig;
use crate::error::{BudgetError, Result};
use crate::fs::write_atomic;

use super::migration::MigrationChain;
use super::record::Record;

/// In-memory records of one type, with id allocation and dirty tracking.
///
/// Ids start at 1, only ever grow and are never handed out twice, even after
/// the record holding them is removed.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    next_id: u64,
    dirty: bool,
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            dirty: false,
        }
    }

    /// Insert `value` under a freshly allocated id and return that id.
    pub fn create(&mut self, mut value: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        value.set_id(id);
        self.records.push(value);
        self.dirty = true;
        id
    }

    pub fn get(&self, id: u64) -> Result<&T> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| BudgetError::not_found(T::KIND, id))
    }

    /// Mutable access for an in-place update; marks the store dirty.
    pub fn get_mut(&mut self, id: u64) -> Result<&mut T> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| BudgetError::not_found(T::KIND, id))?;
        self.dirty = true;
        Ok(record)
    }

    pub fn update(&mut self, id: u64, apply: impl FnOnce(&mut T)) -> Result<()> {
        apply(self.get_mut(id)?);
        Ok(())
    }

    pub fn exists(&self, id: u64) -> bool {
        self.records.iter().any(|record| record.id() == id)
    }

    pub fn remove(&mut self, id: u64) -> Result<T> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| BudgetError::not_found(T::KIND, id))?;
        self.dirty = true;
        Ok(self.records.remove(index))
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.records.iter().find(|record| predicate(record))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn next_id_key() -> String {
        format!("{}:next_id", T::KIND)
    }

    /// Read `path`, migrate it through `chain` if needed, and decode it.
    ///
    /// A missing file yields an empty store. Decoding is strict: any line
    /// that does not fit `T`'s layout fails the whole load.
    pub fn load(
        path: &Path,
        chain: &MigrationChain<'_, T>,
        config: &mut InternalConfig,
    ) -> Result<Self> {
        let persisted_next_id = match config.get(&Self::next_id_key()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                BudgetError::decode(
                    path,
                    0,
                    format!("invalid id counter {}={}", Self::next_id_key(), raw),
                )
            })?,
            None => 1,
        };

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                chain.settle_without_data(config);
                tracing::debug!(kind = T::KIND, path = %path.display(), "no data file yet");
                let mut store = Self::new();
                store.next_id = persisted_next_id.max(1);
                return Ok(store);
            }
            Err(err) => {
                return Err(BudgetError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    err
                )))
            }
        };

        let mut line_numbers = Vec::new();
        let mut raw_records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            line_numbers.push(index + 1);
            raw_records.push(Fields::parse(line));
        }

        let migrated = chain.is_pending(path, config)?;
        let raw_records = chain.run(path, raw_records, config)?;

        let mut records = Vec::with_capacity(raw_records.len());
        let mut seen = HashSet::new();
        let mut max_id = 0;
        for (index, fields) in raw_records.iter().enumerate() {
            // Migrated files are rewritten without blank lines.
            let line = if migrated {
                index + 1
            } else {
                line_numbers[index]
            };
            let record = T::decode(fields).map_err(|e| BudgetError::decode(path, line, e.0))?;
            if !seen.insert(record.id()) {
                return Err(BudgetError::decode(
                    path,
                    line,
                    format!("duplicate id {}", record.id()),
                ));
            }
            max_id = max_id.max(record.id());
            records.push(record);
        }

        tracing::info!(kind = T::KIND, records = records.len(), "loaded records");

        Ok(Self {
            records,
            next_id: (max_id + 1).max(persisted_next_id),
            dirty: false,
        })
    }

    /// Persist the store to `path` if it changed since load or the last save.
    ///
    /// The id counter goes into `config` when it has run ahead of the highest
    /// stored id; the caller is responsible for saving `config`.
    pub fn save(&mut self, path: &Path, config: &mut InternalConfig) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let encoded: Vec<Fields> = self.records.iter().map(T::encode).collect();
        write_data_file(path, &encoded)?;

        let max_id = self.records.iter().map(T::id).max().unwrap_or(0);
        if self.next_id > max_id + 1 {
            config.set(Self::next_id_key(), self.next_id.to_string());
        } else {
            config.remove(&Self::next_id_key());
        }

        tracing::info!(kind = T::KIND, records = self.records.len(), "saved records");
        self.dirty = false;
        Ok(())
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a RecordStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Write encoded records to `path`, one line each.
pub(crate) fn write_data_file(path: &Path, records: &[Fields]) -> Result<()> {
    let mut contents = String::new();
    for fields in records {
        contents.push_str(&fields.to_line());
        contents.push('\n');
    }
    write_atomic(path, contents.as_bytes())
        .map_err(|e| BudgetError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
