//! `expense` and `earning` commands. Both ledgers share one layout; only
//! expenses have recurring templates to catch up before use.

use budget_core::model::entry::{entries_in_month, total, Earnings, Expenses};
use budget_core::model::{Account, AccountResolver, Entry, EntryKind};
use budget_core::{DataDir, RecordStore, YearMonth};
use chrono::NaiveDate;

use crate::app::{load_expenses, AppContext};
use crate::cli::{DeleteArgs, EntryAddArgs, EntryListArgs, EntrySubcommand};
use crate::helpers::confirm_delete;
use crate::output::{entries_json, format_amount, print_json, render_table};

/// How a ledger is loaded for a command.
trait EntryLedger: EntryKind + Sized {
    fn load(
        data: &mut DataDir,
        accounts: &RecordStore<Account>,
        today: NaiveDate,
    ) -> anyhow::Result<RecordStore<Entry<Self>>>;
}

impl EntryLedger for Expenses {
    fn load(
        data: &mut DataDir,
        accounts: &RecordStore<Account>,
        today: NaiveDate,
    ) -> anyhow::Result<RecordStore<Entry<Self>>> {
        load_expenses(data, accounts, today)
    }
}

impl EntryLedger for Earnings {
    fn load(
        data: &mut DataDir,
        _accounts: &RecordStore<Account>,
        _today: NaiveDate,
    ) -> anyhow::Result<RecordStore<Entry<Self>>> {
        Ok(data.load_earnings()?)
    }
}

pub fn handle_expense(ctx: &AppContext, command: &EntrySubcommand) -> anyhow::Result<()> {
    handle::<Expenses>(ctx, command)
}

pub fn handle_earning(ctx: &AppContext, command: &EntrySubcommand) -> anyhow::Result<()> {
    handle::<Earnings>(ctx, command)
}

fn handle<K: EntryLedger>(ctx: &AppContext, command: &EntrySubcommand) -> anyhow::Result<()> {
    match command {
        EntrySubcommand::List(args) => handle_list::<K>(ctx, args),
        EntrySubcommand::Add(args) => handle_add::<K>(ctx, args),
        EntrySubcommand::Delete(args) => handle_delete::<K>(ctx, args),
    }
}

fn handle_list<K: EntryLedger>(ctx: &AppContext, args: &EntryListArgs) -> anyhow::Result<()> {
    let today = ctx.today();
    let period = args.month.unwrap_or_else(|| YearMonth::of(today));

    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let store = K::load(&mut data, &accounts, today)?;
    let entries = entries_in_month(&store, period);

    if args.json {
        return print_json(&entries_json(&entries, &accounts));
    }
    if entries.is_empty() {
        if !ctx.quiet() {
            println!("No {}s in {}", K::KIND, period);
        }
        return Ok(());
    }

    let currency = ctx.currency()?;
    let mut rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let account = accounts
                .account_by_id(entry.account)
                .map(|account| account.name.clone())
                .unwrap_or_else(|_| format!("#{}", entry.account));
            vec![
                entry.id.to_string(),
                entry.date.to_string(),
                account,
                entry.name.clone(),
                format_amount(entry.amount, currency),
            ]
        })
        .collect();
    rows.push(vec![
        String::new(),
        String::new(),
        String::new(),
        "Total".to_string(),
        format_amount(total(entries.iter().copied()), currency),
    ]);

    println!(
        "{}",
        render_table(
            &["ID", "Date", "Account", "Name", "Amount"],
            rows,
            ctx.unicode()
        )
    );
    Ok(())
}

fn handle_add<K: EntryLedger>(ctx: &AppContext, args: &EntryAddArgs) -> anyhow::Result<()> {
    let today = ctx.today();
    let date = args.date.unwrap_or(today);

    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let account = accounts.account_for(args.account.trim(), YearMonth::of(date))?;
    let entry = Entry::<K>::new(account.id, date, args.name.trim(), args.amount)?;

    let mut store = K::load(&mut data, &accounts, today)?;
    let id = store.create(entry);
    data.save(&mut store)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Added {} {}", K::KIND, id);
    }
    Ok(())
}

fn handle_delete<K: EntryLedger>(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let mut store = K::load(&mut data, &accounts, ctx.today())?;

    let name = store.get(args.id)?.name.clone();
    if !confirm_delete(&format!("{} {} ({})", K::KIND, args.id, name), args.yes)? {
        return Ok(());
    }
    store.remove(args.id)?;
    data.save(&mut store)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Deleted {} {}", K::KIND, args.id);
    }
    Ok(())
}
