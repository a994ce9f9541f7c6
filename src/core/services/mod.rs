pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{SummaryService, DEFAULT_MONTHS_BACK, DEFAULT_RECENT_LIMIT};
pub use transaction_service::{TransactionFilter, TransactionService};
