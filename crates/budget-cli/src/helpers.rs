//! Helpers shared by command handlers.

use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::errors::CliError;

/// Ask before deleting `what`; `--yes` skips the prompt.
///
/// Without a terminal there is nobody to ask, so the deletion is refused.
pub fn confirm_delete(what: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "Refusing to delete {} without confirmation; pass --yes",
            what
        ))
        .into());
    }
    Confirm::new()
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
