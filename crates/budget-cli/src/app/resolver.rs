//! Path resolution for the config file and the data directory.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_data_dir, read_config, BudgetConfig};

/// Resolve the config file path, checking BUDGET_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("BUDGET_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Read the config file if there is one.
pub fn load_config() -> anyhow::Result<Option<BudgetConfig>> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(None);
    }
    read_config(&path).map(Some)
}

/// Resolve the data directory from CLI args, then config, then XDG defaults.
pub fn resolve_data_dir(cli: &Cli, config: Option<&BudgetConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.data_dir.clone() {
        return Ok(path);
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.data.directory));
    }
    default_data_dir()
}

/// Error message when the data directory is missing.
pub fn missing_data_message(path: &Path) -> String {
    format!("No budget data found at {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flag_wins_over_config() {
        let cli =
            Cli::try_parse_from(["budget", "--data-dir", "/tmp/flag", "check"]).expect("parse");
        let config = BudgetConfig::new(Path::new("/tmp/config"), None);
        assert_eq!(
            resolve_data_dir(&cli, Some(&config)).expect("resolve"),
            PathBuf::from("/tmp/flag")
        );
    }

    #[test]
    fn test_config_used_without_flag() {
        let cli = Cli::try_parse_from(["budget", "check"]).expect("parse");
        if cli.data_dir.is_some() {
            // BUDGET_DATA_DIR is set in this environment.
            return;
        }
        let config = BudgetConfig::new(Path::new("/tmp/config"), None);
        assert_eq!(
            resolve_data_dir(&cli, Some(&config)).expect("resolve"),
            PathBuf::from("/tmp/config")
        );
    }
}
