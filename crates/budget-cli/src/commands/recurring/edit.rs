use budget_core::recurrence::{edit_template, TemplateInput};

use crate::app::{catch_up, AppContext};
use crate::cli::RecurringEditArgs;
use crate::errors::CliError;

pub fn handle_edit(ctx: &AppContext, args: &RecurringEditArgs) -> anyhow::Result<()> {
    if args.account.is_none() && args.name.is_none() && args.amount.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to change; pass --account, --name or --amount",
        )
        .into());
    }

    let today = ctx.today();
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let mut templates = data.load_recurrings(&accounts)?;
    let mut expenses = data.load_expenses()?;
    catch_up(&mut data, &templates, &mut expenses, &accounts, today)?;

    let current = templates.get(args.id)?;
    let input = TemplateInput::new(
        args.account
            .as_deref()
            .map(str::trim)
            .unwrap_or(current.account.as_str()),
        args.name
            .as_deref()
            .map(str::trim)
            .unwrap_or(current.name.as_str()),
        args.amount.unwrap_or(current.amount),
    );

    let retargeted = edit_template(
        &mut templates,
        &mut expenses,
        &accounts,
        args.id,
        input,
        today,
    )?;
    data.save(&mut expenses)?;
    data.save(&mut templates)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Recurring expense {} has been modified", args.id);
        if let Some(expense_id) = retargeted {
            println!("Updated expense {} to match", expense_id);
        }
    }
    Ok(())
}
