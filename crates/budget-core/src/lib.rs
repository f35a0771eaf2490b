//! # Budget Core
//!
//! Core library for budget - a file-backed, CLI-first personal-finance ledger.
//!
//! This crate holds the persistence layer and the domain logic, independent
//! of the CLI interface.
//!
//! ## Architecture
//!
//! - **codec**: `:`-delimited line format shared by every record file
//! - **store**: generic record store, record trait and schema migrations
//! - **config**: internal key-value config (schema markers, id counters)
//! - **data_dir**: data directory entry point used by commands
//! - **model**: accounts, expenses, earnings, recurring templates, wishes
//! - **recurrence**: materializes recurring templates into monthly expenses

pub mod codec;
pub mod config;
pub mod data_dir;
pub mod date;
pub mod error;
pub mod fs;
pub mod model;
pub mod recurrence;
pub mod store;

pub use data_dir::DataDir;
pub use date::YearMonth;
pub use error::{BudgetError, Result};
pub use store::{MigrationChain, MigrationStep, Record, RecordStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
