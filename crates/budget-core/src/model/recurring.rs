//! Recurring expense templates.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::codec::{FieldError, FieldResult, Fields};
use crate::error::{BudgetError, Result};
use crate::store::{MigrationChain, MigrationStep, Record, RecordStore};

use super::account::{Account, AccountResolver};

/// How often a template produces an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Monthly,
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = FieldError;

    fn from_str(value: &str) -> FieldResult<Self> {
        match value {
            "monthly" => Ok(Recurrence::Monthly),
            other => Err(FieldError(format!("unknown recurrence \"{}\"", other))),
        }
    }
}

/// A template for an expense that repeats every period.
///
/// The account is referenced by name: account records are re-keyed per
/// period, so the concrete id is resolved when an entry is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recurring {
    pub id: u64,
    pub guid: String,
    pub account: String,
    pub name: String,
    pub amount: Decimal,
    pub recurs: Recurrence,
}

impl Recurring {
    pub fn monthly(account: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: 0,
            guid: Uuid::new_v4().to_string(),
            account: account.into(),
            name: name.into(),
            amount,
            recurs: Recurrence::Monthly,
        }
    }
}

impl Record for Recurring {
    const KIND: &'static str = "recurring";
    const FILE_NAME: &'static str = "recurrings.data";
    const SCHEMA_VERSION: u32 = 2;

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
            self.account.clone(),
            self.name.clone(),
            self.amount.to_string(),
            self.recurs.to_string(),
        ])
    }

    fn decode(fields: &Fields) -> FieldResult<Self> {
        fields.expect_len(6)?;
        Ok(Self {
            id: fields.number(0)?,
            guid: fields.text(1)?,
            account: fields.text(2)?,
            name: fields.text(3)?,
            amount: fields.amount(4)?,
            recurs: fields.text(5)?.parse()?,
        })
    }
}

/// Schema history of `recurrings.data`.
///
/// Version 1 stored the numeric id of an account record in field 2; version 2
/// stores the account name, resolved through `accounts`.
pub fn migrations(accounts: &RecordStore<Account>) -> Result<MigrationChain<'_, Recurring>> {
    MigrationChain::new().step(MigrationStep::new(1, 2, move |path, records| {
        records
            .into_iter()
            .enumerate()
            .map(|(index, mut fields)| {
                fields
                    .expect_len(6)
                    .map_err(|e| BudgetError::decode(path, index + 1, e.0))?;
                let account_id: u64 = fields
                    .number(2)
                    .map_err(|e| BudgetError::decode(path, index + 1, e.0))?;
                let name = accounts.account_by_id(account_id)?.name.clone();
                fields
                    .set(2, name)
                    .map_err(|e| BudgetError::decode(path, index + 1, e.0))?;
                Ok(fields)
            })
            .collect()
    }))
}
