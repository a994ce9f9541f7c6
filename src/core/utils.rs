use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const HOME_ENV: &str = "FINANCE_CORE_HOME";
const LEDGER_DIR: &str = "ledgers";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ledgers_dir_in(base: &Path) -> PathBuf {
    base.join(LEDGER_DIR)
}

/// Resolves the file holding the ledger stored under `name`.
pub fn ledger_file_in(base: &Path, name: &str) -> PathBuf {
    ledgers_dir_in(base).join(format!("{}.json", canonical_name(name)))
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Lowercases `name` and replaces anything outside `[a-z0-9]` with `_`.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "transactions".into()
    } else {
        sanitized
    }
}
