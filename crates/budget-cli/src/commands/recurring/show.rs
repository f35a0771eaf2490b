use budget_core::recurrence::{first_matched, last_matched};
use budget_core::YearMonth;
use rust_decimal::Decimal;

use crate::app::{catch_up, AppContext};
use crate::cli::RecurringShowArgs;
use crate::output::{format_amount, print_json, render_table, templates_json, TemplateRow};

pub fn handle_show(ctx: &AppContext, args: &RecurringShowArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let templates = data.load_recurrings(&accounts)?;
    let mut expenses = data.load_expenses()?;
    catch_up(&mut data, &templates, &mut expenses, &accounts, ctx.today())?;

    let listed: Vec<_> = templates
        .iter()
        .map(|template| TemplateRow {
            template,
            first: first_matched(template, &expenses, &accounts),
            last: last_matched(template, &expenses, &accounts),
        })
        .collect();

    if args.json {
        return print_json(&templates_json(&listed));
    }
    if listed.is_empty() {
        if !ctx.quiet() {
            println!("No recurring expenses");
        }
        return Ok(());
    }

    let currency = ctx.currency()?;
    let mut rows: Vec<Vec<String>> = listed
        .iter()
        .map(|row| {
            let template = row.template;
            vec![
                template.id.to_string(),
                template.account.clone(),
                template.name.clone(),
                format_amount(template.amount, currency),
                template.recurs.to_string(),
                month_cell(row.first),
                month_cell(row.last),
            ]
        })
        .collect();
    let monthly: Decimal = templates.iter().map(|template| template.amount).sum();
    rows.push(vec![
        String::new(),
        String::new(),
        "Total".to_string(),
        format_amount(monthly, currency),
        String::new(),
        String::new(),
        String::new(),
    ]);

    println!(
        "{}",
        render_table(
            &["ID", "Account", "Name", "Amount", "Recurs", "First", "Last"],
            rows,
            ctx.unicode()
        )
    );
    Ok(())
}

fn month_cell(month: Option<YearMonth>) -> String {
    month
        .map(|month| month.to_string())
        .unwrap_or_else(|| "-".to_string())
}
