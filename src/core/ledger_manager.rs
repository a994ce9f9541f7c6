//! Process-level holder for the single open ledger.

use crate::{
    config::Config,
    core::format::Formatter,
    core::time::{Clock, SystemClock},
    errors::LedgerError,
    ledger::{Ledger, LoadReport},
    storage::{JsonStorage, LedgerStorage},
};

/// Opens the ledger described by a [`Config`] and hands out access to it.
///
/// Accessing the ledger before [`LedgerManager::open`] fails with
/// [`LedgerError::NotInitialized`].
#[derive(Debug)]
pub struct LedgerManager {
    config: Config,
    current: Option<Ledger>,
}

impl LedgerManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn formatter(&self) -> Formatter {
        self.config.formatter()
    }

    /// Opens the JSON ledger file configured for this session.
    pub fn open(&mut self) -> &LoadReport {
        let storage = JsonStorage::in_dir(&self.config.data_dir(), &self.config.ledger_name);
        tracing::debug!(path = %storage.path().display(), "opening ledger");
        self.open_with(Box::new(storage), Box::new(SystemClock))
    }

    /// Opens a ledger over an explicit backend and clock, replacing any open one.
    pub fn open_with(
        &mut self,
        storage: Box<dyn LedgerStorage>,
        clock: Box<dyn Clock>,
    ) -> &LoadReport {
        let ledger = self.current.insert(Ledger::open_with_clock(storage, clock));
        ledger.load_report()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn ledger(&self) -> Result<&Ledger, LedgerError> {
        self.current.as_ref().ok_or(LedgerError::NotInitialized)
    }

    pub fn ledger_mut(&mut self) -> Result<&mut Ledger, LedgerError> {
        self.current.as_mut().ok_or(LedgerError::NotInitialized)
    }

    /// Closes the ledger, returning it. Later access fails until reopened.
    pub fn close(&mut self) -> Option<Ledger> {
        self.current.take()
    }
}
