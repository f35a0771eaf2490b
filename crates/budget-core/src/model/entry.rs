//! Ledger entries: expenses and earnings.
//!
//! Both share one layout, `id:guid:account:name:amount:date`, and differ only
//! in the file they live in.

use std::marker::PhantomData;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::codec::{format_date, FieldResult, Fields};
use crate::date::YearMonth;
use crate::error::{BudgetError, Result};
use crate::store::{Record, RecordStore};

/// Distinguishes the ledgers sharing the [`Entry`] layout.
pub trait EntryKind {
    const KIND: &'static str;
    const FILE_NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expenses;

impl EntryKind for Expenses {
    const KIND: &'static str = "expense";
    const FILE_NAME: &'static str = "expenses.data";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Earnings;

impl EntryKind for Earnings {
    const KIND: &'static str = "earning";
    const FILE_NAME: &'static str = "earnings.data";
}

/// One dated amount booked against a specific account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry<K> {
    pub id: u64,
    pub guid: String,
    /// Id of the account record valid on `date`.
    pub account: u64,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(skip)]
    _kind: PhantomData<K>,
}

pub type Expense = Entry<Expenses>;
pub type Earning = Entry<Earnings>;

impl<K> Entry<K> {
    pub fn new(
        account: u64,
        date: NaiveDate,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BudgetError::Validation("name cannot be empty".to_string()));
        }
        if amount < Decimal::ZERO {
            return Err(BudgetError::Validation(format!(
                "amount cannot be negative: {}",
                amount
            )));
        }
        Ok(Self {
            id: 0,
            guid: Uuid::new_v4().to_string(),
            account,
            name,
            amount,
            date,
            _kind: PhantomData,
        })
    }

    pub fn in_month(&self, period: YearMonth) -> bool {
        period.contains(self.date)
    }
}

impl<K: EntryKind> Record for Entry<K> {
    const KIND: &'static str = K::KIND;
    const FILE_NAME: &'static str = K::FILE_NAME;
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
            self.account.to_string(),
            self.name.clone(),
            self.amount.to_string(),
            format_date(self.date),
        ])
    }

    fn decode(fields: &Fields) -> FieldResult<Self> {
        fields.expect_len(6)?;
        Ok(Self {
            id: fields.number(0)?,
            guid: fields.text(1)?,
            account: fields.number(2)?,
            name: fields.text(3)?,
            amount: fields.amount(4)?,
            date: fields.date(5)?,
            _kind: PhantomData,
        })
    }
}

/// Entries dated within `period`, oldest first.
pub fn entries_in_month<K: EntryKind>(
    store: &RecordStore<Entry<K>>,
    period: YearMonth,
) -> Vec<&Entry<K>> {
    let mut entries: Vec<&Entry<K>> = store.iter().filter(|e| e.in_month(period)).collect();
    entries.sort_by_key(|e| (e.date, e.id));
    entries
}

/// Sum of amounts of `entries`.
pub fn total<'a, K: 'a>(entries: impl IntoIterator<Item = &'a Entry<K>>) -> Decimal {
    entries.into_iter().map(|e| e.amount).sum()
}
