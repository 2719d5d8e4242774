//! Clinic configuration.
//!
//! Every field has a default, so a config file only needs the values that
//! differ from a stock install.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DEFAULT_KEY_PREFIX;
use crate::models::DEFAULT_EXPIRY_WINDOW_DAYS;

pub const CLINIC_NAME: &str = "Abdullah Dental Care";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Clinic identity printed on prescriptions and receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClinicProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Default for ClinicProfile {
    fn default() -> Self {
        Self {
            name: CLINIC_NAME.into(),
            address: "Hayatabad, Peshawar".into(),
            phone: "091-5844533".into(),
        }
    }
}

/// Doctor signing prescriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Prescriber {
    pub name: String,
    /// Pakistan Medical Commission registration number
    pub pmc_number: String,
}

impl Default for Prescriber {
    fn default() -> Self {
        Self {
            name: "Dr. Ahmed".into(),
            pmc_number: "7071-D".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    pub key_prefix: String,
    /// SQLite file. `None` keeps everything in memory.
    pub database_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.into(),
            database_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryConfig {
    /// Items expiring within this many days are flagged.
    pub expiry_window_days: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClinicConfig {
    pub clinic: ClinicProfile,
    pub prescriber: Prescriber,
    pub storage: StorageConfig,
    pub inventory: InventoryConfig,
}

impl ClinicConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded clinic config");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
