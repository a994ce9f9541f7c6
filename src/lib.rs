#![doc(test(attr(deny(warnings))))]

//! Finance Core holds the transaction ledger of a personal-finance tracker
//! and the analytics derived from it: totals, balance, category breakdowns,
//! recent activity and monthly series.
//!
//! ```
//! use chrono::NaiveDate;
//! use finance_core::{
//!     domain::{ExpenseCategory, IncomeCategory, NewTransaction},
//!     ledger::Ledger,
//!     storage::MemoryStorage,
//! };
//!
//! let mut ledger = Ledger::open(Box::new(MemoryStorage::new()));
//! let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! ledger.add(NewTransaction::new("Salary", 100.0, IncomeCategory::Salary, day)).unwrap();
//! ledger.add(NewTransaction::new("Groceries", 40.0, ExpenseCategory::Food, day)).unwrap();
//! assert_eq!(ledger.balance(), 60.0);
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use errors::{ConfigError, LedgerError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and logs the build being run.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(build = %build.summary(), "Finance Core tracing initialized.");
    });
}
