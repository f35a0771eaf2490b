//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (data directory, record id, account name).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Data files unreadable, unwritable or malformed.
    pub const DATA_ERROR: i32 = 5;
}

/// Legacy internal config key left behind by older versions of the catch-up.
pub const LEGACY_LAST_CHECKED_KEY: &str = "recurring:last_checked";
