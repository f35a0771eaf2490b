//! Wish-list items.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::codec::{format_date, format_flag, FieldError, FieldResult, Fields};
use crate::error::{BudgetError, Result};
use crate::store::{MigrationChain, MigrationStep, Record, RecordStore};

/// Default importance and urgency for items predating those fields.
pub const DEFAULT_PRIORITY: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wish {
    pub id: u64,
    pub guid: String,
    pub date: NaiveDate,
    pub name: String,
    pub amount: Decimal,
    pub paid: bool,
    pub paid_amount: Decimal,
    /// 1 (low) to 3 (high)
    pub importance: u8,
    /// 1 (low) to 3 (high)
    pub urgency: u8,
}

impl Wish {
    pub fn new(
        date: NaiveDate,
        name: impl Into<String>,
        amount: Decimal,
        importance: u8,
        urgency: u8,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BudgetError::Validation("name cannot be empty".to_string()));
        }
        check_amount(amount)?;
        check_priority("importance", importance)?;
        check_priority("urgency", urgency)?;
        Ok(Self {
            id: 0,
            guid: Uuid::new_v4().to_string(),
            date,
            name,
            amount,
            paid: false,
            paid_amount: Decimal::ZERO,
            importance,
            urgency,
        })
    }
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(BudgetError::Validation(format!(
            "amount cannot be negative: {}",
            amount
        )));
    }
    Ok(())
}

fn check_priority(label: &str, value: u8) -> Result<()> {
    if !(1..=3).contains(&value) {
        return Err(BudgetError::Validation(format!(
            "{} must be between 1 and 3, got {}",
            label, value
        )));
    }
    Ok(())
}

fn priority_field(fields: &Fields, index: usize, label: &str) -> FieldResult<u8> {
    let value = fields.number(index)?;
    check_priority(label, value).map_err(|e| FieldError(format!("field {}: {}", index, e)))?;
    Ok(value)
}

/// Mark a wish as bought for `paid_amount`.
pub fn mark_paid(wishes: &mut RecordStore<Wish>, id: u64, paid_amount: Decimal) -> Result<()> {
    check_amount(paid_amount)?;
    let wish = wishes.get(id)?;
    if wish.paid {
        return Err(BudgetError::Validation(format!(
            "wish {} is already paid",
            id
        )));
    }
    wishes.update(id, |wish| {
        wish.paid = true;
        wish.paid_amount = paid_amount;
    })
}

/// Unpaid wishes, most important and most urgent first.
pub fn open_wishes(wishes: &RecordStore<Wish>) -> Vec<&Wish> {
    let mut open: Vec<&Wish> = wishes.iter().filter(|w| !w.paid).collect();
    open.sort_by(|a, b| {
        (b.importance, b.urgency, a.id).cmp(&(a.importance, a.urgency, b.id))
    });
    open
}

impl Record for Wish {
    const KIND: &'static str = "wish";
    const FILE_NAME: &'static str = "wishes.data";
    const SCHEMA_VERSION: u32 = 4;

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
            format_date(self.date),
            self.name.clone(),
            self.amount.to_string(),
            format_flag(self.paid),
            self.paid_amount.to_string(),
            self.importance.to_string(),
            self.urgency.to_string(),
        ])
    }

    fn decode(fields: &Fields) -> FieldResult<Self> {
        fields.expect_len(9)?;
        let importance = priority_field(fields, 7, "importance")?;
        let urgency = priority_field(fields, 8, "urgency")?;
        Ok(Self {
            id: fields.number(0)?,
            guid: fields.text(1)?,
            date: fields.date(2)?,
            name: fields.text(3)?,
            amount: fields.amount(4)?,
            paid: fields.flag(5)?,
            paid_amount: fields.amount(6)?,
            importance,
            urgency,
        })
    }
}

/// Schema history of `wishes.data`.
///
/// - v2: `id:guid:date:name:amount`
/// - v3: adds `paid:paid_amount`
/// - v4: adds `importance:urgency`
pub fn migrations() -> Result<MigrationChain<'static, Wish>> {
    MigrationChain::new()
        .step(MigrationStep::per_record(2, 3, |mut fields| {
            fields.expect_len(5)?;
            fields.push(format_flag(false));
            fields.push(Decimal::ZERO.to_string());
            Ok(fields)
        }))?
        .step(MigrationStep::per_record(3, 4, |mut fields| {
            fields.expect_len(7)?;
            fields.push(DEFAULT_PRIORITY.to_string());
            fields.push(DEFAULT_PRIORITY.to_string());
            Ok(fields)
        }))
}
