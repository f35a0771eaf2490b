//! Application-level utilities for the budget CLI.
//!
//! This module provides:
//! - Path resolution for the config file and the data directory
//! - The per-invocation application context
//! - Loading expenses with recurring templates caught up

mod context;
mod preload;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use preload::{catch_up, load_expenses};
pub use resolver::resolve_config_path;
