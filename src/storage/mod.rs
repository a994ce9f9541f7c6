//! Persistence adapters for the ledger snapshot.
//!
//! A ledger is stored as one JSON document:
//! `{ "schema_version": 1, "transactions": [...] }`. Documents written before
//! the version field existed are a bare transaction array; they load as
//! schema version 0 and are rewritten in the current layout on the next save.
//!
//! Records are decoded one at a time. A record that cannot be decoded is left
//! out and reported, and the rest of the document still loads.

pub mod json_backend;
pub mod memory;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::transaction::Transaction, errors::LedgerError};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;
/// Schema version assigned to bare-array documents.
pub const LEGACY_SCHEMA_VERSION: u32 = 0;

/// Abstraction over backends that hold a single ledger snapshot.
pub trait LedgerStorage: Send + Sync {
    /// Returns the stored snapshot, or an empty one when nothing was saved yet.
    fn load(&self) -> Result<StoredLedger, LedgerError>;

    /// Replaces the stored snapshot with `transactions`.
    fn save(&self, transactions: &[Transaction]) -> Result<(), LedgerError>;

    /// Moves unreadable state out of the way so the next save cannot destroy it.
    /// Returns where it went, when the backend has such a notion.
    fn quarantine(&self) -> Result<Option<PathBuf>, LedgerError> {
        Ok(None)
    }

    /// Copies the stored state without moving it, before a save would drop
    /// records that failed to decode.
    fn backup(&self) -> Result<Option<PathBuf>, LedgerError> {
        Ok(None)
    }
}

/// Decoded persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLedger {
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// One message per record that could not be decoded and was left out.
    #[serde(skip)]
    pub rejected: Vec<String>,
}

impl Default for StoredLedger {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawDocument {
    schema_version: u32,
    #[serde(default)]
    transactions: Vec<Value>,
}

#[derive(Serialize)]
struct StoredLedgerRef<'a> {
    schema_version: u32,
    transactions: &'a [Transaction],
}

/// Serializes `transactions` in the current document layout.
pub fn encode_document(transactions: &[Transaction]) -> Result<String, LedgerError> {
    let document = StoredLedgerRef {
        schema_version: CURRENT_SCHEMA_VERSION,
        transactions,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parses either document layout, rejecting schema versions from the future.
///
/// Only a document that is not JSON, or whose envelope is malformed, fails
/// as a whole. Individual bad records end up in [`StoredLedger::rejected`].
pub fn decode_document(data: &str) -> Result<StoredLedger, LedgerError> {
    if data.trim().is_empty() {
        return Ok(StoredLedger::default());
    }
    let value: Value = serde_json::from_str(data)?;
    let raw = match value {
        Value::Array(records) => RawDocument {
            schema_version: LEGACY_SCHEMA_VERSION,
            transactions: records,
        },
        other => serde_json::from_value::<RawDocument>(other)?,
    };
    if raw.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Persistence(format!(
            "ledger schema v{} is newer than supported v{}",
            raw.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    let (transactions, rejected) = decode_records(raw.transactions);
    Ok(StoredLedger {
        schema_version: raw.schema_version,
        transactions,
        rejected,
    })
}

fn decode_records(records: Vec<Value>) -> (Vec<Transaction>, Vec<String>) {
    let mut transactions = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("without id")
            .to_string();
        match serde_json::from_value::<Transaction>(record) {
            Ok(txn) => transactions.push(txn),
            Err(err) => rejected.push(format!("record #{index} ({id}) skipped: {err}")),
        }
    }
    (transactions, rejected)
}

/// Flags loaded records that break the invariants enforced on `add`.
pub fn ledger_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut warnings = Vec::new();
    for txn in transactions {
        if !txn.amount.is_finite() || txn.amount < 0.0 {
            warnings.push(format!(
                "transaction {} has invalid amount {}",
                txn.id, txn.amount
            ));
        }
        if txn.description.trim().is_empty() {
            warnings.push(format!("transaction {} has a blank description", txn.id));
        }
    }
    warnings
}
