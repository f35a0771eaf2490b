use budget_core::model::{Account, Earning, Expense, Recurring, Wish};
use budget_core::{Record, RecordStore};

use crate::app::{catch_up, AppContext};
use crate::output::render_table;

fn summary_row<T: Record>(store: &RecordStore<T>) -> Vec<String> {
    vec![
        T::FILE_NAME.to_string(),
        T::SCHEMA_VERSION.to_string(),
        store.len().to_string(),
        store.next_id().to_string(),
    ]
}

/// Load every data file, which migrates outdated ones, and report what was found.
pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let templates = data.load_recurrings(&accounts)?;
    let mut expenses = data.load_expenses()?;
    let generated = catch_up(&mut data, &templates, &mut expenses, &accounts, ctx.today())?;
    let earnings = data.load_earnings()?;
    let wishes = data.load_wishes()?;
    data.flush()?;

    if !ctx.quiet() {
        let rows = vec![
            summary_row::<Account>(&accounts),
            summary_row::<Expense>(&expenses),
            summary_row::<Earning>(&earnings),
            summary_row::<Recurring>(&templates),
            summary_row::<Wish>(&wishes),
        ];
        println!("Data directory: {}", data.root().display());
        println!(
            "{}",
            render_table(&["File", "Schema", "Records", "Next id"], rows, ctx.unicode())
        );
        if generated > 0 {
            println!("Generated {} recurring expenses", generated);
        }
        println!("Check: OK");
    }
    Ok(())
}
