//! Application context for the budget CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file.

use std::io::IsTerminal;
use std::path::PathBuf;

use budget_core::DataDir;
use chrono::{Local, NaiveDate};
use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::BudgetConfig;
use crate::errors::CliError;

use super::resolver::{load_config, missing_data_message, resolve_data_dir};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<BudgetConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The date commands treat as today; `--today` pins it.
    pub fn today(&self) -> NaiveDate {
        self.cli
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// The config file, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<Option<&BudgetConfig>> {
        self.config
            .get_or_try_init(load_config)
            .map(Option::as_ref)
    }

    pub fn currency(&self) -> anyhow::Result<Option<&str>> {
        Ok(self
            .config()?
            .and_then(|config| config.ui.currency.as_deref()))
    }

    /// Whether tables may use box-drawing characters.
    pub fn unicode(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    pub fn data_dir_path(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli, self.config()?)
    }

    /// Open the data directory; it must have been created by `budget init`.
    pub fn open_data(&self) -> anyhow::Result<DataDir> {
        let path = self.data_dir_path()?;
        if !path.is_dir() {
            return Err(CliError::not_found(
                missing_data_message(&path),
                "Run:\n  budget init\n\nOr point to existing data:\n  BUDGET_DATA_DIR=/path/to/data budget check",
            )
            .into());
        }
        Ok(DataDir::open(path)?)
    }
}
