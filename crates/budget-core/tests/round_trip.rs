use std::fmt::Debug;

use budget_core::model::{Account, Earning, Expense, Recurring, Wish};
use budget_core::{DataDir, Record, RecordStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn assert_round_trip<T>(values: Vec<T>, reload: impl Fn(&mut DataDir) -> RecordStore<T>)
where
    T: Record + Clone + PartialEq + Debug,
{
    let dir = tempdir().expect("tempdir");
    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let mut store = RecordStore::new();
    for value in values {
        store.create(value);
    }
    data.save(&mut store).expect("save should succeed");
    data.flush().expect("flush should succeed");

    let mut reopened = DataDir::open(dir.path()).expect("reopen should succeed");
    let reloaded = reload(&mut reopened);
    let before: Vec<&T> = store.iter().collect();
    let after: Vec<&T> = reloaded.iter().collect();
    assert_eq!(before, after);
    assert_eq!(reloaded.next_id(), store.next_id());
}

#[test]
fn test_accounts_round_trip() {
    let mut closed = Account::new("Old: checking", Decimal::new(1050, 2), date(2021, 1, 1))
        .expect("valid account");
    closed.until = date(2022, 12, 31);
    assert_round_trip(
        vec![
            closed,
            Account::new("Savings\\EUR", Decimal::ZERO, date(2023, 1, 1)).expect("valid"),
        ],
        |data| data.load_accounts().expect("load accounts"),
    );
}

#[test]
fn test_entries_round_trip() {
    assert_round_trip(
        vec![
            Expense::new(1, date(2023, 4, 2), "Groceries: week 1", Decimal::new(8743, 2))
                .expect("valid"),
            Expense::new(2, date(2023, 4, 30), "Coffee", Decimal::new(35, 1)).expect("valid"),
        ],
        |data| data.load_expenses().expect("load expenses"),
    );
    assert_round_trip(
        vec![Earning::new(1, date(2023, 4, 25), "Salary", Decimal::new(320000, 2))
            .expect("valid")],
        |data| data.load_earnings().expect("load earnings"),
    );
}

#[test]
fn test_recurring_round_trip() {
    assert_round_trip(
        vec![
            Recurring::monthly("Checking", "Rent", Decimal::new(100000, 2)),
            Recurring::monthly("Checking", "Phone: mobile", Decimal::new(1999, 2)),
        ],
        |data| {
            let accounts = data.load_accounts().expect("load accounts");
            data.load_recurrings(&accounts).expect("load templates")
        },
    );
}

#[test]
fn test_wishes_round_trip() {
    let mut paid = Wish::new(date(2023, 1, 5), "Bike", Decimal::new(450, 0), 3, 1)
        .expect("valid wish");
    paid.paid = true;
    paid.paid_amount = Decimal::new(42999, 2);
    assert_round_trip(
        vec![
            paid,
            Wish::new(date(2023, 2, 1), "Lamp", Decimal::new(30, 0), 1, 2).expect("valid wish"),
        ],
        |data| data.load_wishes().expect("load wishes"),
    );
}

#[test]
fn test_ids_survive_deletion_across_sessions() {
    let dir = tempdir().expect("tempdir");
    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let mut expenses = data.load_expenses().expect("load expenses");
    let keep = expenses.create(
        Expense::new(1, date(2023, 4, 1), "Rent", Decimal::ONE).expect("valid"),
    );
    let last = expenses.create(
        Expense::new(1, date(2023, 4, 2), "Food", Decimal::ONE).expect("valid"),
    );
    expenses.remove(last).expect("remove should succeed");
    data.save(&mut expenses).expect("save should succeed");
    data.flush().expect("flush should succeed");

    let mut reopened = DataDir::open(dir.path()).expect("reopen should succeed");
    let mut expenses = reopened.load_expenses().expect("load expenses");
    assert!(expenses.exists(keep));
    let next = expenses.create(
        Expense::new(1, date(2023, 4, 3), "Bus", Decimal::ONE).expect("valid"),
    );
    assert_eq!(next, last + 1);
}
