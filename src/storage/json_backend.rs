use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{
    core::utils::ledger_file_in,
    domain::transaction::Transaction,
    errors::LedgerError,
};

use super::{decode_document, encode_document, LedgerStorage, StoredLedger};

const TMP_SUFFIX: &str = "tmp";
const ASIDE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Filesystem-backed JSON persistence for a single ledger file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage for the ledger called `name` under the data directory `base`.
    pub fn in_dir(base: &Path, name: &str) -> Self {
        Self::new(ledger_file_in(base, name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for JsonStorage {
    fn load(&self) -> Result<StoredLedger, LedgerError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no ledger file yet");
            return Ok(StoredLedger::default());
        }
        let data = fs::read_to_string(&self.path)?;
        decode_document(&data)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let json = encode_document(transactions)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "ledger saved"
        );
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, LedgerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = aside_path(&self.path, "corrupt");
        fs::rename(&self.path, &target)?;
        Ok(Some(target))
    }

    fn backup(&self) -> Result<Option<PathBuf>, LedgerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = aside_path(&self.path, "backup");
        fs::copy(&self.path, &target)?;
        Ok(Some(target))
    }
}

/// `<stem>.<tag>-<timestamp>.json` next to `path`.
fn aside_path(path: &Path, tag: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("ledger");
    let timestamp = Utc::now().format(ASIDE_TIMESTAMP_FORMAT);
    path.with_file_name(format!("{stem}.{tag}-{timestamp}.json"))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
