use budget_core::model::account::{accounts_open_on, add_account, archive_account, open_ended};
use budget_core::model::Account;
use budget_core::YearMonth;

use crate::app::{load_expenses, AppContext};
use crate::cli::{
    AccountAddArgs, AccountArchiveArgs, AccountListArgs, AccountSubcommand, DeleteArgs,
};
use crate::errors::CliError;
use crate::helpers::confirm_delete;
use crate::output::{format_amount, print_json, render_table};

pub fn handle(ctx: &AppContext, command: &AccountSubcommand) -> anyhow::Result<()> {
    match command {
        AccountSubcommand::List(args) => handle_list(ctx, args),
        AccountSubcommand::Add(args) => handle_add(ctx, args),
        AccountSubcommand::Archive(args) => handle_archive(ctx, args),
        AccountSubcommand::Delete(args) => handle_delete(ctx, args),
    }
}

fn handle_list(ctx: &AppContext, args: &AccountListArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;

    let listed: Vec<&Account> = if args.all {
        let mut all: Vec<&Account> = accounts.iter().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.since.cmp(&b.since)));
        all
    } else {
        accounts_open_on(&accounts, ctx.today())
    };

    if args.json {
        return print_json(&listed);
    }
    if listed.is_empty() {
        if !ctx.quiet() {
            println!("No accounts found.");
        }
        return Ok(());
    }

    let currency = ctx.currency()?;
    let rows = listed
        .iter()
        .map(|account| {
            let until = if account.until == open_ended() {
                "-".to_string()
            } else {
                account.until.to_string()
            };
            vec![
                account.id.to_string(),
                account.name.clone(),
                format_amount(account.amount, currency),
                account.since.to_string(),
                until,
            ]
        })
        .collect();
    println!(
        "{}",
        render_table(
            &["ID", "Name", "Amount", "Since", "Until"],
            rows,
            ctx.unicode()
        )
    );
    Ok(())
}

fn handle_add(ctx: &AppContext, args: &AccountAddArgs) -> anyhow::Result<()> {
    let since = args
        .since
        .unwrap_or_else(|| YearMonth::of(ctx.today()).first_day());
    let account = Account::new(args.name.trim(), args.amount, since)?;

    let mut data = ctx.open_data()?;
    let mut accounts = data.load_accounts()?;
    let id = add_account(&mut accounts, account).map_err(|e| {
        CliError::invalid_input(format!(
            "{}\nUse `budget account archive` to start a new version.",
            e
        ))
    })?;
    data.save(&mut accounts)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Account {} has been created", id);
    }
    Ok(())
}

fn handle_archive(ctx: &AppContext, args: &AccountArchiveArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let mut accounts = data.load_accounts()?;

    let id = archive_account(&mut accounts, &args.name, args.amount, ctx.today())?;
    data.save(&mut accounts)?;
    data.flush()?;

    if !ctx.quiet() {
        println!(
            "Account \"{}\" has been archived; new version {} starts in {}",
            args.name,
            id,
            YearMonth::of(ctx.today())
        );
    }
    Ok(())
}

fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let mut accounts = data.load_accounts()?;
    let name = accounts.get(args.id)?.name.clone();

    let expenses = load_expenses(&mut data, &accounts, ctx.today())?;
    let earnings = data.load_earnings()?;
    let used = expenses.iter().filter(|e| e.account == args.id).count()
        + earnings.iter().filter(|e| e.account == args.id).count();
    if used > 0 {
        return Err(CliError::invalid_input(format!(
            "Account {} is still used by {} entries",
            args.id, used
        ))
        .into());
    }

    let other_versions = accounts
        .iter()
        .any(|account| account.id != args.id && account.name == name);
    if !other_versions {
        let templates = data.load_recurrings(&accounts)?;
        if templates.iter().any(|template| template.account == name) {
            return Err(CliError::invalid_input(format!(
                "Account \"{}\" is still used by recurring expenses",
                name
            ))
            .into());
        }
    }

    if !confirm_delete(&format!("account {} ({})", args.id, name), args.yes)? {
        return Ok(());
    }
    accounts.remove(args.id)?;
    data.save(&mut accounts)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Account {} has been deleted", args.id);
    }
    Ok(())
}
