//! Error types for budget core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and exit codes.

use std::path::Path;

use thiserror::Error;

/// Result type alias for budget operations.
pub type Result<T> = std::result::Result<T, BudgetError>;

/// Core error type for budget operations.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Operation on an unknown record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or disallowed field value
    #[error("Validation error: {0}")]
    Validation(String),

    /// On-disk data does not match the expected layout
    #[error("Decode error in {path} line {line}: {message}")]
    Decode {
        path: String,
        line: usize,
        message: String,
    },

    /// File unreadable or unwritable
    #[error("I/O error: {0}")]
    Io(String),
}

impl BudgetError {
    /// Build a decode error for a specific line of a data file.
    ///
    /// `line` is 1-based; pass 0 when the problem is not tied to a line.
    pub fn decode(path: &Path, line: usize, message: impl Into<String>) -> Self {
        BudgetError::Decode {
            path: path.display().to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn not_found(kind: &str, id: u64) -> Self {
        BudgetError::NotFound(format!("no {} with id {}", kind, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BudgetError::NotFound(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::Io(err.to_string())
    }
}
