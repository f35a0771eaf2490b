//! Expense loading with recurring templates caught up to today.
//!
//! Every command that reads expenses goes through here so the ledger always
//! holds one generated entry per template and elapsed month.

use budget_core::model::{Account, Expense, Recurring};
use budget_core::recurrence::materialize;
use budget_core::{DataDir, RecordStore};
use chrono::NaiveDate;

use crate::constants::LEGACY_LAST_CHECKED_KEY;

/// Load expenses and generate the missing recurring ones.
pub fn load_expenses(
    data: &mut DataDir,
    accounts: &RecordStore<Account>,
    today: NaiveDate,
) -> anyhow::Result<RecordStore<Expense>> {
    let templates = data.load_recurrings(accounts)?;
    let mut expenses = data.load_expenses()?;
    catch_up(data, &templates, &mut expenses, accounts, today)?;
    Ok(expenses)
}

/// Materialize `templates` into `expenses` and persist what was generated.
pub fn catch_up(
    data: &mut DataDir,
    templates: &RecordStore<Recurring>,
    expenses: &mut RecordStore<Expense>,
    accounts: &RecordStore<Account>,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    let generated = materialize(templates, expenses, accounts, today)?;
    if !generated.is_empty() {
        data.save(expenses)?;
    }
    data.config_mut().remove(LEGACY_LAST_CHECKED_KEY);
    data.flush()?;
    Ok(generated.len())
}
