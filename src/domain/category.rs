//! Closed, kind-partitioned category taxonomy.
//!
//! A [`Category`] carries its [`TransactionKind`] in the variant itself, so an
//! expense category cannot be attached to an income record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Color token used when a category has no dedicated chart color.
pub const FALLBACK_COLOR_TOKEN: &str = "bg-gray-500";

/// Direction of a transaction. The stored amount is always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Investments,
    OtherIncome,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 4] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Investments,
        IncomeCategory::OtherIncome,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            IncomeCategory::Salary => "salary",
            IncomeCategory::Freelance => "freelance",
            IncomeCategory::Investments => "investments",
            IncomeCategory::OtherIncome => "other_income",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Investments => "Investments",
            IncomeCategory::OtherIncome => "Other",
        }
    }
}

impl FromStr for IncomeCategory {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == value)
            .ok_or_else(|| {
                ValidationError::new("category", format!("`{value}` is not an income category"))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Housing,
    Food,
    Transport,
    Health,
    Education,
    Entertainment,
    Shopping,
    Bills,
    OtherExpense,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Housing,
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Bills,
        ExpenseCategory::OtherExpense,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Health => "health",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Bills => "bills",
            ExpenseCategory::OtherExpense => "other_expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::OtherExpense => "Other",
        }
    }

    /// Chart color token shown next to the category in breakdowns.
    pub fn color_token(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "bg-indigo-500",
            ExpenseCategory::Food => "bg-green-500",
            ExpenseCategory::Transport => "bg-amber-500",
            ExpenseCategory::Health => "bg-blue-500",
            ExpenseCategory::Education => "bg-cyan-500",
            ExpenseCategory::Entertainment => "bg-red-500",
            ExpenseCategory::Shopping => "bg-purple-500",
            ExpenseCategory::Bills => "bg-emerald-500",
            ExpenseCategory::OtherExpense => FALLBACK_COLOR_TOKEN,
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == value)
            .ok_or_else(|| {
                ValidationError::new("category", format!("`{value}` is not an expense category"))
            })
    }
}

/// A category tagged with the kind of transaction it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    /// Resolves a stored `(type, category)` pair, rejecting cross-taxonomy keys.
    pub fn parse(kind: TransactionKind, key: &str) -> Result<Self, ValidationError> {
        match kind {
            TransactionKind::Income => key.parse().map(Category::Income),
            TransactionKind::Expense => key.parse().map(Category::Expense),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Category::Income(_) => TransactionKind::Income,
            Category::Expense(_) => TransactionKind::Expense,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Category::Income(category) => category.key(),
            Category::Expense(category) => category.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Income(category) => category.label(),
            Category::Expense(category) => category.label(),
        }
    }

    pub fn color_token(&self) -> &'static str {
        match self {
            Category::Income(_) => FALLBACK_COLOR_TOKEN,
            Category::Expense(category) => category.color_token(),
        }
    }

    /// Every category valid for `kind`, in display order.
    pub fn all_for(kind: TransactionKind) -> Vec<Category> {
        match kind {
            TransactionKind::Income => IncomeCategory::ALL
                .into_iter()
                .map(Category::Income)
                .collect(),
            TransactionKind::Expense => ExpenseCategory::ALL
                .into_iter()
                .map(Category::Expense)
                .collect(),
        }
    }
}

impl From<IncomeCategory> for Category {
    fn from(category: IncomeCategory) -> Self {
        Category::Income(category)
    }
}

impl From<ExpenseCategory> for Category {
    fn from(category: ExpenseCategory) -> Self {
        Category::Expense(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
