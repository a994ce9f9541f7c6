//! Services, formatting, and process-level ledger management.

pub mod format;
pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;
