//! # Global Config Repository
//!
//! A single `global_config.yaml` at the root of the data directory:
//!
//! ```yaml
//! data_directory: null
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```
//!
//! `data_directory` optionally redirects the whole store somewhere else
//! (e.g. a synced folder); `JsonConnection::new_default` honours it.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Optional override for where the data files live
    pub data_directory: Option<String>,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            data_directory: None,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Clone)]
pub struct GlobalConfigRepository {
    connection: Arc<JsonConnection>,
}

impl GlobalConfigRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// Load the global config, creating the default one on first use.
    pub fn get_global_config(&self) -> Result<GlobalConfig> {
        let config_path = self.connection.global_config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: GlobalConfig = serde_yaml::from_str(&yaml_content)?;
            debug!("loaded global config from {}", config_path.display());
            Ok(config)
        } else {
            let config = GlobalConfig::default();
            self.save_global_config(&config)?;
            info!("created default global config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Point the store at a different data directory (None reverts to the
    /// default location on next start).
    pub fn set_data_directory(&self, data_directory: Option<String>) -> Result<()> {
        let mut config = self.get_global_config()?;
        config.data_directory = data_directory.clone();
        config.updated_at = Utc::now().to_rfc3339();
        self.save_global_config(&config)?;

        match data_directory {
            Some(dir) => info!("set data directory override to '{}'", dir),
            None => info!("cleared data directory override"),
        }
        Ok(())
    }

    pub fn update_global_config(&self, config: &GlobalConfig) -> Result<()> {
        let mut updated = config.clone();
        updated.updated_at = Utc::now().to_rfc3339();
        self.save_global_config(&updated)
    }

    fn save_global_config(&self, config: &GlobalConfig) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)?;
        self.connection
            .write_atomic(&self.connection.global_config_path(), &yaml_content)
    }
}
