pub mod category;
pub mod common;
pub mod summary;
pub mod transaction;

pub use category::{Category, ExpenseCategory, IncomeCategory, TransactionKind};
pub use common::{Displayable, Identifiable};
pub use summary::{CategoryBreakdown, MonthlyData, Totals};
pub use transaction::{NewTransaction, Transaction, DEFAULT_STATUS};
