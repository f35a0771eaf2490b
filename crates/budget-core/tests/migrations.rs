use std::fs;

use budget_core::model::{Recurring, Wish};
use budget_core::{BudgetError, DataDir};
use rust_decimal::Decimal;
use tempfile::tempdir;

const ACCOUNTS: &str = "1:a1:Checking:0:2020-01-01:2099-12-31\n\
                        2:a2:Savings:0:2020-01-01:2099-12-31\n";

#[test]
fn test_recurring_v1_account_ids_become_names() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("accounts.data"), ACCOUNTS).expect("write accounts");
    fs::write(
        dir.path().join("recurrings.data"),
        "1:r1:1:Rent:1000.00:monthly\n\n2:r2:2:Rainy day:50:monthly\n",
    )
    .expect("write templates");
    fs::write(dir.path().join("config.data"), "recurring:version=1\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let accounts = data.load_accounts().expect("load accounts");
    let templates = data
        .load_recurrings(&accounts)
        .expect("migration should succeed");

    let names: Vec<&str> = templates.iter().map(|t| t.account.as_str()).collect();
    assert_eq!(names, vec!["Checking", "Savings"]);
    assert!(!templates.is_dirty());

    let path = data.path_for::<Recurring>();
    let migrated = fs::read_to_string(&path).expect("read templates");
    assert_eq!(
        migrated,
        "1:r1:Checking:Rent:1000.00:monthly\n2:r2:Savings:Rainy day:50:monthly\n"
    );
    let config = fs::read_to_string(dir.path().join("config.data")).expect("read config");
    assert!(!config.contains("recurring:version"));

    // A second load sees the current format and leaves the file alone.
    let mut reopened = DataDir::open(dir.path()).expect("reopen should succeed");
    let accounts = reopened.load_accounts().expect("load accounts");
    reopened
        .load_recurrings(&accounts)
        .expect("second load should succeed");
    assert_eq!(fs::read_to_string(&path).expect("read templates"), migrated);
}

#[test]
fn test_recurring_migration_with_unknown_account_changes_nothing() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("accounts.data"), ACCOUNTS).expect("write accounts");
    let original = "1:r1:9:Rent:1000.00:monthly\n";
    fs::write(dir.path().join("recurrings.data"), original).expect("write templates");
    fs::write(dir.path().join("config.data"), "recurring:version=1\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let accounts = data.load_accounts().expect("load accounts");
    let err = data
        .load_recurrings(&accounts)
        .expect_err("unknown account id should fail");
    assert!(err.is_not_found());

    assert_eq!(
        fs::read_to_string(dir.path().join("recurrings.data")).expect("read templates"),
        original
    );
    assert_eq!(data.config().get("recurring:version"), Some("1"));
}

#[test]
fn test_wishes_v2_walk_the_whole_chain() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("wishes.data"),
        "1:w1:2023-01-05:Bike:450.00\n2:w2:2023-02-01:Lamp\\: brass:30\n",
    )
    .expect("write wishes");
    fs::write(dir.path().join("config.data"), "wish:version=2\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let wishes = data.load_wishes().expect("migration should succeed");

    let lamp = wishes.get(2).expect("lamp");
    assert_eq!(lamp.name, "Lamp: brass");
    assert!(!lamp.paid);
    assert_eq!(lamp.paid_amount, Decimal::ZERO);
    assert_eq!((lamp.importance, lamp.urgency), (2, 2));

    assert_eq!(
        fs::read_to_string(data.path_for::<Wish>()).expect("read wishes"),
        "1:w1:2023-01-05:Bike:450.00:0:0:2:2\n2:w2:2023-02-01:Lamp\\: brass:30:0:0:2:2\n"
    );
    assert_eq!(data.config().get("wish:version"), None);
}

#[test]
fn test_wishes_v3_only_gain_priorities() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("wishes.data"),
        "1:w1:2023-01-05:Bike:450.00:1:420.00\n",
    )
    .expect("write wishes");
    fs::write(dir.path().join("config.data"), "wish:version=3\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let wishes = data.load_wishes().expect("migration should succeed");
    let bike = wishes.get(1).expect("bike");
    assert!(bike.paid);
    assert_eq!(bike.paid_amount, Decimal::new(42000, 2));
    assert_eq!(bike.importance, 2);
}

#[test]
fn test_marker_for_missing_file_is_cleared() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("config.data"), "wish:version=2\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let wishes = data.load_wishes().expect("load should succeed");
    assert!(wishes.is_empty());
    data.flush().expect("flush should succeed");

    let config = fs::read_to_string(dir.path().join("config.data")).expect("read config");
    assert!(config.is_empty());
}

#[test]
fn test_future_marker_is_a_decode_error() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("wishes.data"), "").expect("write wishes");
    fs::write(dir.path().join("config.data"), "wish:version=9\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let err = data.load_wishes().expect_err("future marker should fail");
    assert!(matches!(err, BudgetError::Decode { .. }));
}

/// A crash after the data rewrite but before the marker is cleared leaves a
/// current-format file behind a stale marker. The rerun must fail loudly.
#[test]
fn test_stale_marker_over_migrated_file_is_a_decode_error() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("accounts.data"), ACCOUNTS).expect("write accounts");
    let migrated = "1:r1:Checking:Rent:1000.00:monthly\n";
    fs::write(dir.path().join("recurrings.data"), migrated).expect("write templates");
    fs::write(dir.path().join("config.data"), "recurring:version=1\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let accounts = data.load_accounts().expect("load accounts");
    let err = data
        .load_recurrings(&accounts)
        .expect_err("stale marker should fail");
    assert!(matches!(err, BudgetError::Decode { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("recurrings.data")).expect("read templates"),
        migrated
    );
}

#[test]
fn test_numeric_account_name_cannot_pass_as_an_id() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("accounts.data"),
        "1:a1:2:0:2020-01-01:2099-12-31\n2:a2:Savings:0:2020-01-01:2099-12-31\n",
    )
    .expect("write accounts");
    let migrated = "1:r1:2:Rent:1000.00:monthly\n";
    fs::write(dir.path().join("recurrings.data"), migrated).expect("write templates");
    fs::write(dir.path().join("config.data"), "recurring:version=1\n").expect("write config");

    let mut data = DataDir::open(dir.path()).expect("open should succeed");
    let err = data
        .load_accounts()
        .expect_err("numeric account name should fail");
    assert!(matches!(err, BudgetError::Decode { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("recurrings.data")).expect("read templates"),
        migrated
    );
    assert_eq!(data.config().get("recurring:version"), Some("1"));
}
