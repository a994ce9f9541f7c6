use std::{collections::HashSet, fmt, path::PathBuf};

use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use uuid::Uuid;

use crate::{
    core::{
        services::{SummaryService, TransactionFilter, TransactionService},
        time::{Clock, SystemClock},
    },
    domain::{
        common::{Displayable, Identifiable},
        summary::{CategoryBreakdown, MonthlyData, Totals},
        transaction::{NewTransaction, Transaction},
    },
    errors::LedgerError,
    storage::{ledger_warnings, LedgerStorage, CURRENT_SCHEMA_VERSION},
};

/// Outcome of reading the stored snapshot when the ledger was opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub schema_version: u32,
    /// The document used an older layout and will be rewritten on the next save.
    pub migrated: bool,
    /// Why the stored snapshot was discarded, when it could not be read.
    pub recovered_from: Option<String>,
    /// Where the unreadable snapshot was moved, if the backend keeps files.
    pub quarantined: Option<PathBuf>,
    /// Copy of the stored document taken because some records were skipped.
    pub backup: Option<PathBuf>,
    /// Storage could not be read at all. Mutations are refused so the next
    /// save cannot replace data that was never loaded.
    pub read_only: bool,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.recovered_from.is_none() && self.warnings.is_empty() && !self.read_only
    }
}

/// Owns the transaction collection and keeps storage in sync with it.
///
/// Every successful `add`/`delete` writes the full collection before
/// returning. Aggregates are memoized until the next mutation.
pub struct Ledger {
    transactions: Vec<Transaction>,
    version: u64,
    storage: Box<dyn LedgerStorage>,
    clock: Box<dyn Clock>,
    report: LoadReport,
    totals: OnceCell<Totals>,
    breakdown: OnceCell<Vec<CategoryBreakdown>>,
}

impl Ledger {
    /// Loads the ledger from `storage`, falling back to an empty ledger when
    /// the stored snapshot cannot be read. See [`Ledger::load_report`].
    pub fn open(storage: Box<dyn LedgerStorage>) -> Self {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(storage: Box<dyn LedgerStorage>, clock: Box<dyn Clock>) -> Self {
        let (transactions, report) = load_snapshot(storage.as_ref());
        tracing::info!(
            count = transactions.len(),
            schema_version = report.schema_version,
            recovered = report.recovered_from.is_some(),
            "ledger opened"
        );
        Self {
            transactions,
            version: 0,
            storage,
            clock,
            report,
            totals: OnceCell::new(),
            breakdown: OnceCell::new(),
        }
    }

    /// Validates and appends a new record, then persists the collection.
    ///
    /// On a failed write the record is dropped again and the error returned.
    pub fn add(&mut self, new: NewTransaction) -> Result<Uuid, LedgerError> {
        self.ensure_writable()?;
        new.validate()?;
        let id = self.fresh_id();
        let txn = new.into_transaction(id);
        let label = txn.display_label();
        self.transactions.push(txn);
        if let Err(err) = self.storage.save(&self.transactions) {
            self.transactions.pop();
            tracing::warn!(error = %err, %label, "add rolled back, ledger not persisted");
            return Err(err);
        }
        self.mutated();
        tracing::debug!(%label, version = self.version, "transaction added");
        Ok(id)
    }

    /// Removes the record with `id`. Unknown ids are ignored and return `false`.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, LedgerError> {
        self.ensure_writable()?;
        let Some(index) = self.transactions.iter().position(|txn| txn.has_id(id)) else {
            tracing::debug!(%id, "delete ignored, no such transaction");
            return Ok(false);
        };
        let removed = self.transactions.remove(index);
        if let Err(err) = self.storage.save(&self.transactions) {
            self.transactions.insert(index, removed);
            tracing::warn!(error = %err, %id, "delete rolled back, ledger not persisted");
            return Err(err);
        }
        self.mutated();
        tracing::debug!(%id, version = self.version, "transaction deleted");
        Ok(true)
    }

    /// Immutable view of the collection in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        TransactionService::find(&self.transactions, id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Incremented by every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn totals(&self) -> Totals {
        *self
            .totals
            .get_or_init(|| SummaryService::totals(&self.transactions))
    }

    pub fn total_income(&self) -> f64 {
        self.totals().income
    }

    pub fn total_expenses(&self) -> f64 {
        self.totals().expenses
    }

    pub fn balance(&self) -> f64 {
        self.totals().balance()
    }

    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        SummaryService::recent(&self.transactions, limit)
    }

    pub fn category_breakdown(&self) -> &[CategoryBreakdown] {
        self.breakdown
            .get_or_init(|| SummaryService::category_breakdown(&self.transactions))
    }

    /// Monthly series ending with the clock's current month, oldest first.
    pub fn monthly_data(&self, months_back: u32) -> Vec<MonthlyData> {
        SummaryService::monthly_data(&self.transactions, self.today(), months_back)
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        TransactionService::filter(&self.transactions, filter)
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn ensure_writable(&self) -> Result<(), LedgerError> {
        if !self.report.read_only {
            return Ok(());
        }
        let reason = self.report.recovered_from.as_deref().unwrap_or("storage unreadable");
        Err(LedgerError::ReadOnly(format!("stored ledger was not loaded ({reason})")))
    }

    fn mutated(&mut self) {
        self.version += 1;
        self.totals.take();
        self.breakdown.take();
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions.len())
            .field("version", &self.version)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

fn load_snapshot(storage: &dyn LedgerStorage) -> (Vec<Transaction>, LoadReport) {
    let stored = match storage.load() {
        Ok(stored) => stored,
        Err(LedgerError::Io(err)) => {
            // The document may be fine; leave it in place and refuse writes.
            tracing::warn!(error = %err, "stored ledger could not be read, opening read-only");
            let report = LoadReport {
                schema_version: CURRENT_SCHEMA_VERSION,
                recovered_from: Some(LedgerError::Io(err).to_string()),
                read_only: true,
                ..LoadReport::default()
            };
            return (Vec::new(), report);
        }
        Err(err) => {
            tracing::warn!(error = %err, "stored ledger unreadable, starting empty");
            let mut report = LoadReport {
                schema_version: CURRENT_SCHEMA_VERSION,
                recovered_from: Some(err.to_string()),
                ..LoadReport::default()
            };
            match storage.quarantine() {
                Ok(path) => report.quarantined = path,
                Err(quarantine_err) => {
                    tracing::warn!(
                        error = %quarantine_err,
                        "could not set unreadable ledger aside"
                    );
                    report
                        .warnings
                        .push(format!("unreadable ledger was not preserved: {quarantine_err}"));
                }
            }
            return (Vec::new(), report);
        }
    };

    let mut report = LoadReport {
        schema_version: stored.schema_version,
        migrated: stored.schema_version < CURRENT_SCHEMA_VERSION,
        ..LoadReport::default()
    };
    if !stored.rejected.is_empty() {
        match storage.backup() {
            Ok(path) => report.backup = path,
            Err(backup_err) => {
                tracing::warn!(
                    error = %backup_err,
                    "could not back up ledger with skipped records"
                );
                report
                    .warnings
                    .push(format!("ledger with skipped records was not backed up: {backup_err}"));
            }
        }
        report.warnings.extend(stored.rejected);
    }
    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(stored.transactions.len());
    for txn in stored.transactions {
        if seen.insert(txn.id()) {
            transactions.push(txn);
        } else {
            report
                .warnings
                .push(format!("duplicate transaction id {} dropped", txn.id()));
        }
    }
    report.warnings.extend(ledger_warnings(&transactions));
    for warning in &report.warnings {
        tracing::warn!(%warning, "ledger load warning");
    }
    (transactions, report)
}
