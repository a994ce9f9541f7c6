//! Aggregation engine: pure functions over a ledger snapshot.
//!
//! Every function recomputes from the slice it is given in a single pass (plus
//! a sort where ordering is part of the contract). Nothing here can fail: a
//! zero expense total produces an empty breakdown instead of a division.

use chrono::{Datelike, NaiveDate};

use crate::domain::{
    category::{Category, ExpenseCategory, TransactionKind},
    summary::{CategoryBreakdown, MonthlyData, Totals},
    transaction::Transaction,
};

/// Number of records returned by `recent` when the caller has no preference.
pub const DEFAULT_RECENT_LIMIT: usize = 4;
/// Number of months covered by `monthly_data` when the caller has no preference.
pub const DEFAULT_MONTHS_BACK: u32 = 6;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub struct SummaryService;

impl SummaryService {
    pub fn totals(transactions: &[Transaction]) -> Totals {
        Totals {
            income: sum_kind(transactions, TransactionKind::Income),
            expenses: sum_kind(transactions, TransactionKind::Expense),
        }
    }

    pub fn total_income(transactions: &[Transaction]) -> f64 {
        sum_kind(transactions, TransactionKind::Income)
    }

    pub fn total_expenses(transactions: &[Transaction]) -> f64 {
        sum_kind(transactions, TransactionKind::Expense)
    }

    pub fn balance(transactions: &[Transaction]) -> f64 {
        Self::totals(transactions).balance()
    }

    /// The `limit` most recent records, newest first. Equal dates keep snapshot order.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }

    /// Expense sums per category, largest first.
    ///
    /// Percentages are rounded independently (half away from zero) and are
    /// not adjusted to add up to exactly 100.
    pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryBreakdown> {
        let total = Self::total_expenses(transactions);
        if total == 0.0 {
            return Vec::new();
        }

        let mut groups: Vec<(ExpenseCategory, f64)> = Vec::new();
        for txn in transactions {
            let Category::Expense(category) = txn.category else {
                continue;
            };
            match groups.iter_mut().find(|(key, _)| *key == category) {
                Some((_, sum)) => *sum += txn.amount,
                None => groups.push((category, txn.amount)),
            }
        }

        let mut rows: Vec<CategoryBreakdown> = groups
            .into_iter()
            .map(|(category, value)| CategoryBreakdown {
                category,
                name: category.label().to_string(),
                value,
                percentage: percentage_of(value, total),
                color_token: category.color_token(),
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows
    }

    /// Income and expense per calendar month for the `months_back` months
    /// ending with the month of `today`, oldest first.
    pub fn monthly_data(
        transactions: &[Transaction],
        today: NaiveDate,
        months_back: u32,
    ) -> Vec<MonthlyData> {
        let anchor = month_index(today);
        let mut series: Vec<MonthlyData> = (0..months_back)
            .map(|offset| {
                let index = anchor - offset as i32;
                let year = index.div_euclid(12);
                let month = index.rem_euclid(12) as u32 + 1;
                let mut bucket = MonthlyData {
                    label: month_label(year, month),
                    year,
                    month,
                    income: 0.0,
                    expense: 0.0,
                };
                for txn in transactions.iter().filter(|txn| month_index(txn.date) == index) {
                    match txn.kind() {
                        TransactionKind::Income => bucket.income += txn.amount,
                        TransactionKind::Expense => bucket.expense += txn.amount,
                    }
                }
                bucket
            })
            .collect();
        series.reverse();
        series
    }
}

fn sum_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.kind() == kind)
        .map(|txn| txn.amount)
        .sum()
}

fn percentage_of(value: f64, total: f64) -> i32 {
    // f64::round rounds half away from zero
    (value / total * 100.0).round() as i32
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_label(year: i32, month: u32) -> String {
    format!("{}/{}", MONTH_ABBREVIATIONS[(month - 1) as usize], year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{category::IncomeCategory, transaction::DEFAULT_STATUS};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(
        description: &str,
        amount: f64,
        category: impl Into<Category>,
        on: NaiveDate,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category: category.into(),
            date: on,
            status: Some(DEFAULT_STATUS.into()),
        }
    }

    #[test]
    fn breakdown_rounds_half_away_from_zero() {
        let snapshot = vec![
            txn("Snack", 1.0, ExpenseCategory::Food, date(2025, 1, 1)),
            txn("Taxi", 7.0, ExpenseCategory::Transport, date(2025, 1, 2)),
        ];
        let rows = SummaryService::category_breakdown(&snapshot);
        let pcts: Vec<_> = rows.iter().map(|row| (row.category, row.percentage)).collect();
        assert_eq!(
            pcts,
            vec![(ExpenseCategory::Transport, 88), (ExpenseCategory::Food, 13)]
        );
    }

    #[test]
    fn breakdown_does_not_normalise_to_one_hundred() {
        let snapshot = vec![
            txn("A", 1.0, ExpenseCategory::Food, date(2025, 1, 1)),
            txn("B", 1.0, ExpenseCategory::Bills, date(2025, 1, 1)),
            txn("C", 1.0, ExpenseCategory::Health, date(2025, 1, 1)),
        ];
        let rows = SummaryService::category_breakdown(&snapshot);
        assert_eq!(rows.iter().map(|row| row.percentage).sum::<i32>(), 99);
        // equal sums keep first-seen order
        assert_eq!(rows[0].category, ExpenseCategory::Food);
        assert_eq!(rows[2].category, ExpenseCategory::Health);
    }

    #[test]
    fn breakdown_keeps_sign_of_negative_loaded_amounts() {
        let snapshot = vec![
            txn("Groceries", 150.0, ExpenseCategory::Food, date(2025, 1, 1)),
            txn("Refund", -50.0, ExpenseCategory::Bills, date(2025, 1, 2)),
        ];
        let rows = SummaryService::category_breakdown(&snapshot);
        let pcts: Vec<_> = rows.iter().map(|row| (row.category, row.percentage)).collect();
        assert_eq!(
            pcts,
            vec![(ExpenseCategory::Food, 150), (ExpenseCategory::Bills, -50)]
        );
    }

    #[test]
    fn breakdown_groups_and_ignores_income() {
        let snapshot = vec![
            txn("Rent", 900.0, ExpenseCategory::Housing, date(2025, 1, 1)),
            txn("Salary", 3000.0, IncomeCategory::Salary, date(2025, 1, 1)),
            txn("Water", 50.0, ExpenseCategory::Housing, date(2025, 1, 3)),
            txn("Groceries", 50.0, ExpenseCategory::Food, date(2025, 1, 4)),
        ];
        let rows = SummaryService::category_breakdown(&snapshot);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Housing");
        assert_eq!(rows[0].value, 950.0);
        assert_eq!(rows[0].percentage, 95);
        assert_eq!(rows[0].color_token, "bg-indigo-500");
        assert_eq!(rows[1].percentage, 5);
    }

    #[test]
    fn breakdown_is_empty_when_expenses_sum_to_zero() {
        let snapshot = vec![
            txn("Salary", 10.0, IncomeCategory::Salary, date(2025, 1, 1)),
            txn("Free sample", 0.0, ExpenseCategory::Food, date(2025, 1, 1)),
        ];
        assert!(SummaryService::category_breakdown(&snapshot).is_empty());
    }

    #[test]
    fn recent_keeps_snapshot_order_for_equal_dates() {
        let snapshot = vec![
            txn("first", 1.0, ExpenseCategory::Food, date(2025, 1, 5)),
            txn("older", 1.0, ExpenseCategory::Food, date(2024, 12, 1)),
            txn("second", 1.0, ExpenseCategory::Food, date(2025, 1, 5)),
        ];
        let recent = SummaryService::recent(&snapshot, 2);
        let names: Vec<_> = recent.iter().map(|txn| txn.description.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn monthly_data_spans_year_boundary_oldest_first() {
        let snapshot = vec![
            txn("Dec pay", 100.0, IncomeCategory::Salary, date(2024, 12, 20)),
            txn("Jan rent", 40.0, ExpenseCategory::Housing, date(2025, 1, 2)),
            txn("Too old", 999.0, ExpenseCategory::Housing, date(2024, 10, 31)),
        ];
        let series = SummaryService::monthly_data(&snapshot, date(2025, 1, 15), 3);
        let labels: Vec<_> = series.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov/2024", "Dec/2024", "Jan/2025"]);
        assert_eq!(series[0].income + series[0].expense, 0.0);
        assert_eq!(series[1].income, 100.0);
        assert_eq!(series[2].expense, 40.0);
    }

    #[test]
    fn monthly_data_from_month_end_never_repeats_a_month() {
        let series = SummaryService::monthly_data(&[], date(2025, 3, 31), 2);
        let labels: Vec<_> = series.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb/2025", "Mar/2025"]);
    }

    #[test]
    fn monthly_data_with_zero_months_is_empty() {
        assert!(SummaryService::monthly_data(&[], date(2025, 3, 31), 0).is_empty());
    }
}
