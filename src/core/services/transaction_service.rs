//! Lookup and filtering helpers for transaction lists.

use uuid::Uuid;

use crate::domain::{category::Category, common::Identifiable, transaction::Transaction};

/// Narrows a transaction list by description text and category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive substring match on the description, exact match on category.
    pub fn matches(&self, txn: &Transaction) -> bool {
        let matches_search = match self.search.as_deref() {
            Some(needle) => txn
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        };
        let matches_category = self.category.map_or(true, |category| txn.category == category);
        matches_search && matches_category
    }
}

pub struct TransactionService;

impl TransactionService {
    pub fn find(transactions: &[Transaction], id: Uuid) -> Option<&Transaction> {
        transactions.iter().find(|txn| txn.has_id(id))
    }

    /// Matching records in snapshot order.
    pub fn filter<'a>(
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        transactions.iter().filter(|txn| filter.matches(txn)).collect()
    }
}
