//! Budget CLI - A file-backed, CLI-first personal-finance ledger
//!
//! This is the command-line interface for budget. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;

use budget_core::VERSION;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{accounts, entries, init, maintenance, misc, recurring, wishes};
use crate::errors::classify;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let ctx = AppContext::new(&cli);

    if let Err(err) = run(&ctx, &cli) {
        if let Some(typed) = classify(&err) {
            typed.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr so JSON on stdout stays clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Account(command)) => accounts::handle(ctx, command),
        Some(Commands::Expense(command)) => entries::handle_expense(ctx, command),
        Some(Commands::Earning(command)) => entries::handle_earning(ctx, command),
        Some(Commands::Recurring { command }) => recurring::handle(ctx, command.as_ref()),
        Some(Commands::Wish(command)) => wishes::handle(ctx, command),
        Some(Commands::Check) => maintenance::handle_check(ctx),
        Some(Commands::Completions { shell }) => {
            misc::handle_completions(*shell);
            Ok(())
        }
        None => {
            println!("Budget v{}", VERSION);
            println!("\nRun `budget --help` for usage information.");
            Ok(())
        }
    }
}
