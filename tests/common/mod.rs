#![allow(dead_code)]

use chrono::NaiveDate;
use finance_core::{
    core::time::FixedClock,
    domain::{Category, NewTransaction},
    ledger::Ledger,
    storage::MemoryStorage,
};
use uuid::Uuid;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Ledger over in-memory storage with the clock pinned to `today`.
pub fn ledger_on(today: NaiveDate) -> (Ledger, MemoryStorage) {
    finance_core::init();
    let storage = MemoryStorage::new();
    let ledger = Ledger::open_with_clock(
        Box::new(storage.clone()),
        Box::new(FixedClock::new(today)),
    );
    (ledger, storage)
}

pub fn add(
    ledger: &mut Ledger,
    description: &str,
    amount: f64,
    category: impl Into<Category>,
    on: NaiveDate,
) -> Uuid {
    ledger
        .add(NewTransaction::new(description, amount, category, on))
        .expect("add transaction")
}
