//! The data directory: record files plus the internal config.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::InternalConfig;
use crate::error::{BudgetError, Result};
use crate::model::{recurring, wish, Account, Earning, Expense, Recurring, Wish};
use crate::store::{MigrationChain, Record, RecordStore};

/// Name of the internal config file inside the data directory.
pub const CONFIG_FILE: &str = "config.data";

#[derive(Debug)]
pub struct DataDir {
    root: PathBuf,
    config: InternalConfig,
}

impl DataDir {
    /// Open (creating if needed) the data directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            BudgetError::Io(format!(
                "Failed to create data directory {}: {}",
                root.display(),
                e
            ))
        })?;
        let config = InternalConfig::load(&root.join(CONFIG_FILE))?;
        tracing::debug!(root = %root.display(), "opened data directory");
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for<T: Record>(&self) -> PathBuf {
        self.root.join(T::FILE_NAME)
    }

    pub fn config(&self) -> &InternalConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InternalConfig {
        &mut self.config
    }

    pub fn load<T: Record>(&mut self, chain: &MigrationChain<'_, T>) -> Result<RecordStore<T>> {
        let path = self.path_for::<T>();
        RecordStore::load(&path, chain, &mut self.config)
    }

    /// Load a record type that has no schema history.
    pub fn load_current<T: Record>(&mut self) -> Result<RecordStore<T>> {
        self.load(&MigrationChain::new())
    }

    pub fn load_accounts(&mut self) -> Result<RecordStore<Account>> {
        self.load_current()
    }

    pub fn load_expenses(&mut self) -> Result<RecordStore<Expense>> {
        self.load_current()
    }

    pub fn load_earnings(&mut self) -> Result<RecordStore<Earning>> {
        self.load_current()
    }

    /// Recurring templates; old files reference accounts by id and are
    /// migrated against `accounts`.
    pub fn load_recurrings(
        &mut self,
        accounts: &RecordStore<Account>,
    ) -> Result<RecordStore<Recurring>> {
        let chain = recurring::migrations(accounts)?;
        self.load(&chain)
    }

    pub fn load_wishes(&mut self) -> Result<RecordStore<Wish>> {
        let chain = wish::migrations()?;
        self.load(&chain)
    }

    /// Write `store` if dirty. Call [`flush`](Self::flush) once all stores
    /// are saved.
    pub fn save<T: Record>(&mut self, store: &mut RecordStore<T>) -> Result<()> {
        let path = self.path_for::<T>();
        store.save(&path, &mut self.config)
    }

    /// Persist the internal config if it changed.
    pub fn flush(&mut self) -> Result<()> {
        self.config.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("budget");
        let data = DataDir::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(data.path_for::<Expense>(), root.join("expenses.data"));
    }

    #[test]
    fn test_counter_survives_reopen() {
        let dir = tempdir().unwrap();
        let since = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        let mut data = DataDir::open(dir.path()).unwrap();
        let mut accounts = data.load_accounts().unwrap();
        accounts.create(Account::new("Checking", Decimal::ZERO, since).unwrap());
        let savings = accounts.create(Account::new("Savings", Decimal::ZERO, since).unwrap());
        accounts.remove(savings).unwrap();
        data.save(&mut accounts).unwrap();
        data.flush().unwrap();

        let mut reopened = DataDir::open(dir.path()).unwrap();
        assert_eq!(reopened.config().get("account:next_id"), Some("3"));
        let mut accounts = reopened.load_accounts().unwrap();
        let id = accounts.create(Account::new("Cash", Decimal::ZERO, since).unwrap());
        assert_eq!(id, 3);
    }
}
