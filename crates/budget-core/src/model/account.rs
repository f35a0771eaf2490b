//! Accounts and period-based account resolution.
//!
//! An account name can map to several records over time, each valid for a
//! `since..=until` range. Ledger entries point at a specific record by id;
//! recurring templates point at the name and resolve it per month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::codec::{format_date, FieldError, FieldResult, Fields};
use crate::date::YearMonth;
use crate::error::{BudgetError, Result};
use crate::store::{Record, RecordStore};

/// Upper bound used for accounts that are still open.
pub fn open_ended() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Account names must be non-empty and not purely numeric. Old recurring
/// files stored account ids where names now go, so a numeric name could be
/// mistaken for an id.
fn check_name(name: &str) -> std::result::Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("account name cannot be empty".to_string());
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("account name cannot be a number: \"{}\"", name));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: u64,
    pub guid: String,
    pub name: String,
    pub amount: Decimal,
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl Account {
    /// A new open-ended account starting on `since`.
    pub fn new(name: impl Into<String>, amount: Decimal, since: NaiveDate) -> Result<Self> {
        let name = name.into();
        check_name(&name).map_err(BudgetError::Validation)?;
        Ok(Self {
            id: 0,
            guid: Uuid::new_v4().to_string(),
            name,
            amount,
            since,
            until: open_ended(),
        })
    }

    /// Whether this record's validity range overlaps `period`.
    pub fn is_valid_during(&self, period: YearMonth) -> bool {
        let first = period.first_day();
        let last = period
            .succ()
            .first_day()
            .pred_opt()
            .unwrap_or(first);
        self.since <= last && self.until >= first
    }

    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.since <= date && date <= self.until
    }

    /// Whether both records share a name and at least one day.
    pub fn overlaps(&self, other: &Account) -> bool {
        self.name == other.name && self.since <= other.until && other.since <= self.until
    }
}

impl Record for Account {
    const KIND: &'static str = "account";
    const FILE_NAME: &'static str = "accounts.data";
    const SCHEMA_VERSION: u32 = 1;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn encode(&self) -> Fields {
        Fields::from_values(vec![
            self.id.to_string(),
            self.guid.clone(),
            self.name.clone(),
            self.amount.to_string(),
            format_date(self.since),
            format_date(self.until),
        ])
    }

    fn decode(fields: &Fields) -> FieldResult<Self> {
        fields.expect_len(6)?;
        let name = fields.text(2)?;
        check_name(&name).map_err(|e| FieldError(format!("field 2: {}", e)))?;
        Ok(Self {
            id: fields.number(0)?,
            guid: fields.text(1)?,
            name,
            amount: fields.amount(3)?,
            since: fields.date(4)?,
            until: fields.date(5)?,
        })
    }
}

/// Looks up accounts by id, or by name for a given month.
pub trait AccountResolver {
    fn account_by_id(&self, id: u64) -> Result<&Account>;

    /// The record for `name` that is valid during `period`.
    fn account_for(&self, name: &str, period: YearMonth) -> Result<&Account>;

    fn has_account_named(&self, name: &str) -> bool;
}

impl AccountResolver for RecordStore<Account> {
    fn account_by_id(&self, id: u64) -> Result<&Account> {
        self.get(id)
    }

    fn account_for(&self, name: &str, period: YearMonth) -> Result<&Account> {
        // Several versions can overlap one month; the newest wins.
        self.iter()
            .filter(|account| account.name == name && account.is_valid_during(period))
            .max_by_key(|account| account.since)
            .ok_or_else(|| {
                BudgetError::NotFound(format!(
                    "no account named \"{}\" valid in {}",
                    name, period
                ))
            })
    }

    fn has_account_named(&self, name: &str) -> bool {
        self.iter().any(|account| account.name == name)
    }
}

/// Accounts open on `date`, sorted by name.
pub fn accounts_open_on(accounts: &RecordStore<Account>, date: NaiveDate) -> Vec<&Account> {
    let mut open: Vec<&Account> = accounts.iter().filter(|a| a.is_open_on(date)).collect();
    open.sort_by(|a, b| a.name.cmp(&b.name));
    open
}

/// Store a new account. Versions of one name must not overlap; use
/// [`archive_account`] to start a new version of an existing account.
pub fn add_account(accounts: &mut RecordStore<Account>, account: Account) -> Result<u64> {
    if let Some(existing) = accounts.find(|existing| existing.overlaps(&account)) {
        return Err(BudgetError::Validation(format!(
            "account \"{}\" already exists from {} to {}",
            account.name, existing.since, existing.until
        )));
    }
    Ok(accounts.create(account))
}

/// Close the current version of `name` at the end of the previous month and
/// open a new version from the first of `today`'s month with `amount`.
pub fn archive_account(
    accounts: &mut RecordStore<Account>,
    name: &str,
    amount: Decimal,
    today: NaiveDate,
) -> Result<u64> {
    let period = YearMonth::of(today);
    let since = period.first_day();
    let current_id = accounts.account_for(name, period)?.id;
    let current = accounts.get(current_id)?;
    if current.since >= since {
        return Err(BudgetError::Validation(format!(
            "account \"{}\" already starts in {}",
            name, period
        )));
    }

    let until = since.pred_opt().unwrap_or(since);
    accounts.update(current_id, |account| account.until = until)?;

    let id = accounts.create(Account::new(name, amount, since)?);
    tracing::info!(account = name, old = current_id, new = id, month = %period, "archived account");
    Ok(id)
}
