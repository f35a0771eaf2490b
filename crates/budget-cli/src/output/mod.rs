//! Output formatting helpers for the CLI.
//!
//! Tables for people, JSON for scripts.

mod json;
mod table;

// Re-export public API
pub use json::{entries_json, print_json, templates_json, TemplateRow};
pub use table::{format_amount, render_table};
