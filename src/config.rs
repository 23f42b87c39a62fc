//! Application configuration.
//!
//! Settings live in a TOML file, by default `<config dir>/phonebook/config.toml`.
//! Every field is optional; a missing default file means "all defaults".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};

const APP_DIR: &str = "phonebook";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "phonebook.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file. Empty means the default location.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "info" or "phonebook=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AppConfig {
    /// Load from `path` when given (the file must exist), otherwise from the
    /// default location if a file is there.
    pub fn load(path: Option<&Path>) -> StoreResult<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::load_from(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| StoreError::Config(format!("{}: {}", path.display(), e)))
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Database file to open: the configured path, or the default location.
    pub fn database_path(&self) -> StoreResult<PathBuf> {
        if !self.database.path.trim().is_empty() {
            return Ok(PathBuf::from(self.database.path.trim()));
        }
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StoreError::Config("could not find config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR).join(DATABASE_FILE))
    }
}
