//! Ledger transaction records and their persisted representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::{Category, TransactionKind};
use crate::domain::common::{Displayable, Identifiable};
use crate::errors::ValidationError;

/// Status assigned to every transaction created through the ledger.
pub const DEFAULT_STATUS: &str = "completed";

/// An immutable financial record. Only the ledger creates and removes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub status: Option<String>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        self.category.kind()
    }

    pub fn is_income(&self) -> bool {
        self.kind() == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == TransactionKind::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{} {}]", self.id, self.kind(), self.category)
    }
}

/// Caller-supplied fields for a transaction that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<Category>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    /// Checks the fields the category type cannot enforce on its own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::new("description", "must not be blank"));
        }
        if !self.amount.is_finite() {
            return Err(ValidationError::new("amount", "must be a finite number"));
        }
        if self.amount < 0.0 {
            return Err(ValidationError::new(
                "amount",
                format!("must not be negative (got {})", self.amount),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_transaction(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            status: Some(DEFAULT_STATUS.to_string()),
        }
    }
}

/// Wire shape: `type` and `category` are stored as separate strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    id: Uuid,
    description: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let category = Category::parse(record.kind, &record.category)?;
        Ok(Transaction {
            id: record.id,
            description: record.description,
            amount: record.amount,
            category,
            date: record.date,
            status: record.status,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        TransactionRecord {
            id: txn.id,
            kind: txn.kind(),
            category: txn.category.key().to_string(),
            description: txn.description,
            amount: txn.amount,
            date: txn.date,
            status: txn.status,
        }
    }
}
