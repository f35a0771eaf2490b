use budget_core::DataDir;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_data_dir, write_config, BudgetConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nUse --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let data_dir = match &ctx.cli().data_dir {
        Some(path) => path.clone(),
        None => default_data_dir()?,
    };
    let mut data = DataDir::open(&data_dir)?;
    data.flush()?;

    write_config(
        &config_path,
        &BudgetConfig::new(&data_dir, args.currency.clone()),
    )?;
    tracing::info!(config = %config_path.display(), data = %data_dir.display(), "initialized");

    if !ctx.quiet() {
        println!("Initialized budget data at {}", data_dir.display());
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}
