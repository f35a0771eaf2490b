use budget_core::recurrence::{add_template, TemplateInput};
use budget_core::YearMonth;

use crate::app::{catch_up, AppContext};
use crate::cli::RecurringAddArgs;

pub fn handle_add(ctx: &AppContext, args: &RecurringAddArgs) -> anyhow::Result<()> {
    let today = ctx.today();
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let mut templates = data.load_recurrings(&accounts)?;
    let mut expenses = data.load_expenses()?;
    catch_up(&mut data, &templates, &mut expenses, &accounts, today)?;

    let input = TemplateInput::new(args.account.trim(), args.name.trim(), args.amount);
    let added = add_template(&mut templates, &mut expenses, &accounts, input, today)?;
    data.save(&mut expenses)?;
    data.save(&mut templates)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Recurring expense {} has been created", added.template_id);
        if let Some(expense_id) = added.expense_id {
            println!("Added expense {} for {}", expense_id, YearMonth::of(today));
        }
    }
    Ok(())
}
