//! Recurrence materializer.
//!
//! Keeps the expense ledger in step with recurring templates: every template
//! has exactly one generated expense per elapsed month, from the month after
//! its most recent match up to the current month.
//!
//! Templates are linked to their expenses by identity (name, amount and
//! account *name*), not by a stored key. Two templates with the same
//! identity therefore share their expenses.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::date::YearMonth;
use crate::error::{BudgetError, Result};
use crate::model::{AccountResolver, Expense, Recurring};
use crate::store::RecordStore;

/// The fields an expense must share with a template to count as generated by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateIdentity<'a> {
    pub account: &'a str,
    pub name: &'a str,
    pub amount: Decimal,
}

impl<'a> TemplateIdentity<'a> {
    pub fn of(template: &'a Recurring) -> Self {
        Self {
            account: &template.account,
            name: &template.name,
            amount: template.amount,
        }
    }

    /// Whether `expense` carries this identity. Expenses pointing at an
    /// unknown account never match.
    pub fn matches(&self, expense: &Expense, accounts: &impl AccountResolver) -> bool {
        expense.name == self.name
            && expense.amount == self.amount
            && accounts
                .account_by_id(expense.account)
                .map(|account| account.name == self.account)
                .unwrap_or(false)
    }
}

fn matching_months<'e, R: AccountResolver>(
    identity: TemplateIdentity<'e>,
    expenses: impl Iterator<Item = &'e Expense> + 'e,
    accounts: &'e R,
) -> impl Iterator<Item = YearMonth> + 'e {
    expenses
        .filter(move |expense| identity.matches(expense, accounts))
        .map(|expense| YearMonth::of(expense.date))
}

/// Month of the most recent expense matching `template`, if any.
pub fn last_matched(
    template: &Recurring,
    expenses: &RecordStore<Expense>,
    accounts: &impl AccountResolver,
) -> Option<YearMonth> {
    matching_months(TemplateIdentity::of(template), expenses.iter(), accounts).max()
}

/// Month of the earliest expense matching `template`, if any.
pub fn first_matched(
    template: &Recurring,
    expenses: &RecordStore<Expense>,
    accounts: &impl AccountResolver,
) -> Option<YearMonth> {
    matching_months(TemplateIdentity::of(template), expenses.iter(), accounts).min()
}

/// Generate the missing monthly expenses of every template, up to and
/// including the month of `today`.
///
/// A template without any matching expense only gets the current month.
/// Nothing is inserted unless every generated entry could be built, so a
/// failure leaves `expenses` untouched. Returns the ids of the new expenses.
pub fn materialize(
    templates: &RecordStore<Recurring>,
    expenses: &mut RecordStore<Expense>,
    accounts: &impl AccountResolver,
    today: NaiveDate,
) -> Result<Vec<u64>> {
    let current = YearMonth::of(today);
    let mut planned: Vec<Expense> = Vec::new();

    for template in templates {
        let identity = TemplateIdentity::of(template);
        // Planned entries count too, so identical templates do not double up.
        let last = matching_months(identity, expenses.iter().chain(planned.iter()), accounts).max();
        let months: Vec<YearMonth> = match last {
            Some(last) => last.months_until(current).collect(),
            None => vec![current],
        };

        for period in months {
            let account = accounts.account_for(&template.account, period)?;
            let expense =
                Expense::new(account.id, period.first_day(), &template.name, template.amount)?;
            tracing::debug!(
                template = template.id,
                month = %period,
                account = account.id,
                "generating recurring expense"
            );
            planned.push(expense);
        }
    }

    let ids: Vec<u64> = planned
        .into_iter()
        .map(|expense| expenses.create(expense))
        .collect();
    if !ids.is_empty() {
        tracing::info!(generated = ids.len(), month = %current, "materialized recurring expenses");
    }
    Ok(ids)
}

/// User-supplied fields of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInput {
    pub account: String,
    pub name: String,
    pub amount: Decimal,
}

impl TemplateInput {
    pub fn new(account: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            name: name.into(),
            amount,
        }
    }

    pub fn validate(&self, accounts: &impl AccountResolver) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(BudgetError::Validation(
                "account cannot be empty".to_string(),
            ));
        }
        if !accounts.has_account_named(&self.account) {
            return Err(BudgetError::Validation(format!(
                "unknown account \"{}\"",
                self.account
            )));
        }
        if self.name.trim().is_empty() {
            return Err(BudgetError::Validation("name cannot be empty".to_string()));
        }
        if self.amount < Decimal::ZERO {
            return Err(BudgetError::Validation(format!(
                "amount cannot be negative: {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Result of [`add_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedTemplate {
    pub template_id: u64,
    /// The current month's expense, unless one with the same identity existed.
    pub expense_id: Option<u64>,
}

/// Store a new monthly template and book its expense for the current month.
pub fn add_template(
    templates: &mut RecordStore<Recurring>,
    expenses: &mut RecordStore<Expense>,
    accounts: &impl AccountResolver,
    input: TemplateInput,
    today: NaiveDate,
) -> Result<AddedTemplate> {
    input.validate(accounts)?;
    let current = YearMonth::of(today);
    let template = Recurring::monthly(input.account, input.name, input.amount);

    let identity = TemplateIdentity::of(&template);
    let booked = expenses
        .iter()
        .any(|expense| expense.in_month(current) && identity.matches(expense, accounts));
    let expense = if booked {
        None
    } else {
        let account = accounts.account_for(&template.account, current)?;
        Some(Expense::new(
            account.id,
            today,
            &template.name,
            template.amount,
        )?)
    };

    let template_id = templates.create(template);
    let expense_id = expense.map(|expense| expenses.create(expense));
    tracing::info!(template = template_id, expense = ?expense_id, "added recurring template");
    Ok(AddedTemplate {
        template_id,
        expense_id,
    })
}

/// Replace the fields of template `id`.
///
/// The current month's expense generated from the template's previous
/// values, if there is one, is retargeted to the new values. Earlier months
/// are left alone and no expense is created when none matched. Returns the
/// id of the retargeted expense.
pub fn edit_template(
    templates: &mut RecordStore<Recurring>,
    expenses: &mut RecordStore<Expense>,
    accounts: &impl AccountResolver,
    id: u64,
    input: TemplateInput,
    today: NaiveDate,
) -> Result<Option<u64>> {
    let previous = templates.get(id)?.clone();
    input.validate(accounts)?;
    let current = YearMonth::of(today);

    let identity = TemplateIdentity::of(&previous);
    let target = expenses
        .find(|expense| expense.in_month(current) && identity.matches(expense, accounts))
        .map(|expense| expense.id);

    let retargeted = match target {
        Some(expense_id) => {
            let account_id = accounts.account_for(&input.account, current)?.id;
            let name = input.name.clone();
            let amount = input.amount;
            expenses.update(expense_id, |expense| {
                expense.name = name;
                expense.amount = amount;
                expense.account = account_id;
            })?;
            Some(expense_id)
        }
        None => None,
    };

    templates.update(id, |template| {
        template.account = input.account;
        template.name = input.name;
        template.amount = input.amount;
    })?;
    tracing::info!(template = id, expense = ?retargeted, "edited recurring template");
    Ok(retargeted)
}

/// Remove template `id`. Expenses it generated stay in the ledger.
pub fn delete_template(templates: &mut RecordStore<Recurring>, id: u64) -> Result<Recurring> {
    let removed = templates.remove(id)?;
    tracing::info!(template = id, "deleted recurring template; generated expenses kept");
    Ok(removed)
}
