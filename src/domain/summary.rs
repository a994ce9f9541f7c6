//! Derived values computed from a ledger snapshot. Never persisted.

use serde::Serialize;

use crate::domain::category::ExpenseCategory;

/// Income and expense sums over a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    /// Income minus expenses. Not floored, may be negative.
    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

/// One slice of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: ExpenseCategory,
    pub name: String,
    pub value: f64,
    /// Share of total expenses. Signed, since loaded data may hold negative amounts.
    pub percentage: i32,
    pub color_token: &'static str,
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyData {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}
