use std::path::PathBuf;

use budget_core::{YearMonth, VERSION};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use rust_decimal::Decimal;

/// Budget - A file-backed, CLI-first personal-finance ledger
#[derive(Parser)]
#[command(name = "budget")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the data directory
    #[arg(short, long, global = true, env = "BUDGET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "BUDGET_TODAY", value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BUDGET_LOG", default_value = "warn")]
    pub log_level: String,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and the data directory
    Init(InitArgs),

    /// Manage accounts
    #[command(subcommand)]
    Account(AccountSubcommand),

    /// Manage expenses
    #[command(subcommand)]
    Expense(EntrySubcommand),

    /// Manage earnings
    #[command(subcommand)]
    Earning(EntrySubcommand),

    /// Manage recurring expenses (shows them when no subcommand is given)
    Recurring {
        #[command(subcommand)]
        command: Option<RecurringSubcommand>,
    },

    /// Manage the wish list
    #[command(subcommand)]
    Wish(WishSubcommand),

    /// Load every data file, running pending migrations
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Currency symbol shown next to amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Shared arguments for `delete` subcommands
#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum AccountSubcommand {
    /// List accounts
    List(AccountListArgs),

    /// Add an account
    Add(AccountAddArgs),

    /// Close the current version of an account and open a new one this month
    Archive(AccountArchiveArgs),

    /// Delete an account version
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct AccountListArgs {
    /// Include closed account versions
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AccountAddArgs {
    /// Account name
    #[arg(long)]
    pub name: String,

    /// Initial balance
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Decimal,

    /// First day the account is valid (defaults to the first of this month)
    #[arg(long, value_name = "DATE")]
    pub since: Option<NaiveDate>,
}

#[derive(Args)]
pub struct AccountArchiveArgs {
    /// Account name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Balance of the new version
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Decimal,
}

#[derive(Subcommand)]
pub enum EntrySubcommand {
    /// List entries of one month
    List(EntryListArgs),

    /// Add an entry
    Add(EntryAddArgs),

    /// Delete an entry
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct EntryListArgs {
    /// Month to list (YYYY-MM, defaults to the current month)
    #[arg(long, value_name = "MONTH")]
    pub month: Option<YearMonth>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct EntryAddArgs {
    /// Account name
    #[arg(long)]
    pub account: String,

    /// Entry name
    #[arg(long)]
    pub name: String,

    /// Amount
    #[arg(long)]
    pub amount: Decimal,

    /// Date of the entry (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum RecurringSubcommand {
    /// Show recurring expenses
    Show(RecurringShowArgs),

    /// Add a monthly recurring expense
    Add(RecurringAddArgs),

    /// Edit a recurring expense
    Edit(RecurringEditArgs),

    /// Delete a recurring expense (generated expenses are kept)
    Delete(DeleteArgs),
}

#[derive(Args, Default)]
pub struct RecurringShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RecurringAddArgs {
    /// Account name
    #[arg(long)]
    pub account: String,

    /// Expense name
    #[arg(long)]
    pub name: String,

    /// Monthly amount
    #[arg(long)]
    pub amount: Decimal,
}

#[derive(Args)]
pub struct RecurringEditArgs {
    /// Recurring expense ID
    #[arg(value_name = "ID")]
    pub id: u64,

    /// New account name
    #[arg(long)]
    pub account: Option<String>,

    /// New expense name
    #[arg(long)]
    pub name: Option<String>,

    /// New monthly amount
    #[arg(long)]
    pub amount: Option<Decimal>,
}

#[derive(Subcommand)]
pub enum WishSubcommand {
    /// List wishes
    List(WishListArgs),

    /// Add a wish
    Add(WishAddArgs),

    /// Mark a wish as paid
    Paid(WishPaidArgs),

    /// Delete a wish
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct WishListArgs {
    /// Include paid wishes
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WishAddArgs {
    /// Wish name
    #[arg(long)]
    pub name: String,

    /// Estimated cost
    #[arg(long)]
    pub amount: Decimal,

    /// Importance, 1 (low) to 3 (high)
    #[arg(long, default_value_t = 2)]
    pub importance: u8,

    /// Urgency, 1 (low) to 3 (high)
    #[arg(long, default_value_t = 2)]
    pub urgency: u8,

    /// Date of the wish (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct WishPaidArgs {
    /// Wish ID
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Amount actually paid
    #[arg(long)]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recurring_without_subcommand_parses() {
        let cli = Cli::try_parse_from(["budget", "recurring"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Recurring { command: None })
        ));
    }

    #[test]
    fn test_typed_arguments() {
        let cli = Cli::try_parse_from([
            "budget",
            "--today",
            "2023-06-15",
            "expense",
            "list",
            "--month",
            "2023-04",
        ])
        .expect("parse");
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2023, 6, 15));
        match cli.command {
            Some(Commands::Expense(EntrySubcommand::List(args))) => {
                assert_eq!(args.month, Some(YearMonth::new(2023, 4).expect("month")));
            }
            _ => panic!("expected expense list"),
        }

        assert!(Cli::try_parse_from(["budget", "wish", "add", "--name", "x", "--amount", "ten"])
            .is_err());
    }
}
