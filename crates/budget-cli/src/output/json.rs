//! JSON output formatting.

use budget_core::model::{AccountResolver, Entry, Recurring};
use budget_core::YearMonth;
use serde::Serialize;

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Entries with their account name resolved.
pub fn entries_json<K>(
    entries: &[&Entry<K>],
    accounts: &impl AccountResolver,
) -> Vec<serde_json::Value> {
    entries
        .iter()
        .map(|entry| {
            let account = accounts
                .account_by_id(entry.account)
                .map(|account| account.name.clone())
                .ok();
            serde_json::json!({
                "id": entry.id,
                "guid": entry.guid,
                "date": entry.date,
                "account_id": entry.account,
                "account": account,
                "name": entry.name,
                "amount": entry.amount,
            })
        })
        .collect()
}

/// A template with the months of its earliest and latest generated expense.
pub struct TemplateRow<'a> {
    pub template: &'a Recurring,
    pub first: Option<YearMonth>,
    pub last: Option<YearMonth>,
}

/// Templates with the span of their generated expenses.
pub fn templates_json(rows: &[TemplateRow<'_>]) -> Vec<serde_json::Value> {
    rows.iter()
        .map(|row| {
            let template = row.template;
            serde_json::json!({
                "id": template.id,
                "guid": template.guid,
                "account": template.account,
                "name": template.name,
                "amount": template.amount,
                "recurs": template.recurs,
                "first_month": row.first.map(|month| month.to_string()),
                "last_month": row.last.map(|month| month.to_string()),
            })
        })
        .collect()
}
