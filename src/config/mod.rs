//! User preferences and their on-disk persistence.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        format::{DateFormat, Formatter, NumberFormat},
        services::{DEFAULT_MONTHS_BACK, DEFAULT_RECENT_LIMIT},
        utils::{app_data_dir, config_file_in},
    },
    errors::ConfigError,
};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_LEDGER_NAME: &str = "transactions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the data directory. Defaults to `FINANCE_CORE_HOME` or `~/.finance_core`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Storage key of the ledger file.
    pub ledger_name: String,
    pub number_format: NumberFormat,
    pub date_format: DateFormat,
    pub recent_limit: usize,
    pub months_back: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            ledger_name: DEFAULT_LEDGER_NAME.into(),
            number_format: NumberFormat::default(),
            date_format: DateFormat::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            months_back: DEFAULT_MONTHS_BACK,
        }
    }
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(app_data_dir)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.number_format, self.date_format)
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for `config.json` inside `base`.
    pub fn with_base_dir(base: &Path) -> Self {
        Self::new(config_file_in(base))
    }

    /// Manager for the default application data directory.
    pub fn from_env() -> Self {
        Self::with_base_dir(&app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored config, or defaults when none was saved yet.
    /// Missing fields take their default value.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Like [`ConfigManager::load`], but an unreadable file yields defaults.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "config unreadable, using defaults"
                );
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let mut tmp = self.path.clone();
        tmp.set_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
