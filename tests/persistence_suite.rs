mod common;

use std::fs;

use common::day;
use finance_core::{
    core::time::FixedClock,
    domain::{ExpenseCategory, IncomeCategory, NewTransaction, Transaction},
    errors::LedgerError,
    ledger::Ledger,
    storage::{JsonStorage, LedgerStorage, StoredLedger, CURRENT_SCHEMA_VERSION},
};
use tempfile::tempdir;

fn open(storage: &JsonStorage) -> Ledger {
    Ledger::open_with_clock(
        Box::new(storage.clone()),
        Box::new(FixedClock::new(day(2025, 4, 20))),
    )
}

#[test]
fn ledger_survives_reload() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "household");

    let mut ledger = open(&storage);
    let salary = ledger
        .add(NewTransaction::new("Salary", 2000.0, IncomeCategory::Salary, day(2025, 4, 1)))
        .unwrap();
    let rent = ledger
        .add(NewTransaction::new("Rent", 800.0, ExpenseCategory::Housing, day(2025, 4, 2)))
        .unwrap();
    ledger.delete(rent).unwrap();
    drop(ledger);

    let reopened = open(&storage);
    assert!(reopened.load_report().is_clean());
    assert_eq!(reopened.len(), 1);
    let restored = reopened.get(salary).expect("salary persisted");
    assert_eq!(restored.status.as_deref(), Some("completed"));
    assert_eq!(reopened.balance(), 2000.0);
}

#[test]
fn corrupt_file_recovers_to_empty_and_is_preserved() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "household");
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(storage.path(), "[{\"truncated\":").unwrap();

    let mut ledger = open(&storage);
    assert!(ledger.is_empty());
    let report = ledger.load_report().clone();
    assert!(report.recovered_from.is_some());
    let quarantined = report.quarantined.expect("corrupt file moved aside");
    assert_eq!(fs::read_to_string(&quarantined).unwrap(), "[{\"truncated\":");

    ledger
        .add(NewTransaction::new("Fresh start", 5.0, ExpenseCategory::Food, day(2025, 4, 3)))
        .unwrap();
    assert_eq!(fs::read_to_string(&quarantined).unwrap(), "[{\"truncated\":");
    assert_eq!(open(&storage).len(), 1);
}

#[test]
fn legacy_array_is_migrated_on_next_save() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "legacy");
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(
        storage.path(),
        r#"[{"id":"3f1d6c1e-8f0e-4c59-9a4e-2b8f8f0f6a01","description":"Salário","amount":3500,
            "type":"income","category":"salary","date":"2025-03-05","status":"Concluído"}]"#,
    )
    .unwrap();

    let mut ledger = open(&storage);
    assert!(ledger.load_report().migrated);
    assert_eq!(ledger.load_report().schema_version, 0);
    assert_eq!(ledger.transactions()[0].status.as_deref(), Some("Concluído"));

    ledger
        .add(NewTransaction::new("Coffee", 4.5, ExpenseCategory::Food, day(2025, 3, 6)))
        .unwrap();
    let raw = fs::read_to_string(storage.path()).unwrap();
    let stored: StoredLedger = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(stored.transactions.len(), 2);
}

#[test]
fn future_schema_is_not_overwritten_silently() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "future");
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(storage.path(), r#"{"schema_version": 99, "transactions": []}"#).unwrap();

    assert!(matches!(storage.load(), Err(LedgerError::Persistence(_))));
    let ledger = open(&storage);
    assert!(ledger.is_empty());
    assert!(ledger.load_report().quarantined.is_some());
}

#[test]
fn write_failure_keeps_memory_and_disk_in_sync() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "stuck");
    let mut ledger = open(&storage);
    ledger
        .add(NewTransaction::new("Pay", 10.0, IncomeCategory::Salary, day(2025, 4, 1)))
        .unwrap();
    let original = fs::read_to_string(storage.path()).unwrap();

    // A directory where the temp file should go makes the write fail.
    let mut tmp = storage.path().to_path_buf();
    tmp.set_extension("json.tmp");
    fs::create_dir_all(&tmp).unwrap();

    let lost = NewTransaction::new("Lost", 1.0, ExpenseCategory::Food, day(2025, 4, 2));
    let result = ledger.add(lost);
    assert!(matches!(result, Err(LedgerError::Io(_))));
    assert_eq!(ledger.len(), 1);
    assert_eq!(fs::read_to_string(storage.path()).unwrap(), original);

    let persisted: Vec<Transaction> = storage.load().unwrap().transactions;
    assert_eq!(persisted, ledger.transactions());
}

#[test]
fn bad_legacy_records_do_not_discard_good_ones() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "legacy");
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    let blob = r#"[
        {"id":"3f1d6c1e-8f0e-4c59-9a4e-2b8f8f0f6a01","description":"Salário","amount":3500,
         "type":"income","category":"salary","date":"2025-03-05","status":"Concluído"},
        {"id":"3f1d6c1e-8f0e-4c59-9a4e-2b8f8f0f6a02","description":"Mercado","amount":120.5,
         "type":"expense","category":"food","date":"2025-03-06","status":"Concluído"},
        {"id":"3f1d6c1e-8f0e-4c59-9a4e-2b8f8f0f6a03","description":"Sem valor","amount":null,
         "type":"expense","category":"food","date":"2025-03-07","status":"Concluído"},
        {"id":"3f1d6c1e-8f0e-4c59-9a4e-2b8f8f0f6a04","description":"Troca","amount":10,
         "type":"income","category":"food","date":"2025-03-08","status":"Concluído"}
    ]"#;
    fs::write(storage.path(), blob).unwrap();

    let mut ledger = open(&storage);
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.balance(), 3500.0 - 120.5);

    let report = ledger.load_report().clone();
    assert!(report.recovered_from.is_none());
    assert!(report.quarantined.is_none());
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[0].contains("6a03"));
    assert!(report.warnings[1].contains("not an income category"));
    let backup = report.backup.expect("original document copied");
    assert_eq!(fs::read_to_string(&backup).unwrap(), blob);

    ledger
        .add(NewTransaction::new("Coffee", 4.5, ExpenseCategory::Food, day(2025, 3, 9)))
        .unwrap();
    assert_eq!(open(&storage).len(), 3);
    assert_eq!(fs::read_to_string(&backup).unwrap(), blob);
}

#[test]
fn unreadable_path_opens_read_only_and_leaves_it_alone() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::in_dir(temp.path(), "locked");
    // A directory in place of the file fails the read with an I/O error.
    fs::create_dir_all(storage.path()).unwrap();

    let mut ledger = open(&storage);
    let report = ledger.load_report().clone();
    assert!(report.read_only);
    assert!(report.quarantined.is_none());
    assert!(storage.path().is_dir());

    let pay = NewTransaction::new("Pay", 1.0, IncomeCategory::Salary, day(2025, 4, 1));
    assert!(matches!(ledger.add(pay), Err(LedgerError::ReadOnly(_))));
    assert!(storage.path().is_dir());
}
