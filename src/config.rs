//! Configuration loading and management
//!
//! Handles parsing of `tm.toml` from the data directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Task list configuration
    #[serde(default)]
    pub list: ListConfig,

    /// Task id configuration
    #[serde(default)]
    pub ids: IdConfig,

    /// Proximity alert configuration
    #[serde(default)]
    pub proximity: ProximityConfig,

    /// Notification output configuration
    #[serde(default)]
    pub notifications: NotifyConfig,

    /// Network reachability configuration
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list: ListConfig::default(),
            ids: IdConfig::default(),
            proximity: ProximityConfig::default(),
            notifications: NotifyConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Task list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Default sort criteria: "due", "priority", or "category"
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_sort() -> String {
    "due".to_string()
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
        }
    }
}

/// Task id configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    /// Prefix for generated task ids
    #[serde(default = "default_id_prefix")]
    pub prefix: String,

    /// Minimum id suffix length
    #[serde(default = "default_id_min_len")]
    pub min_len: usize,
}

fn default_id_prefix() -> String {
    "task".to_string()
}

fn default_id_min_len() -> usize {
    3
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            prefix: default_id_prefix(),
            min_len: default_id_min_len(),
        }
    }
}

/// Proximity alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// Alert radius in meters
    #[serde(default = "default_threshold_m")]
    pub threshold_m: f64,
}

fn default_threshold_m() -> f64 {
    100.0
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold_m: default_threshold_m(),
        }
    }
}

/// Notification output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Destination for notification requests: "-" for stdout, or a file
    /// path (relative paths resolve against the data dir)
    #[serde(default = "default_notify_destination")]
    pub destination: String,
}

fn default_notify_destination() -> String {
    "notifications.jsonl".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            destination: default_notify_destination(),
        }
    }
}

/// Network reachability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Treat the host as disconnected; map/place features are blocked
    #[serde(default)]
    pub offline: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { offline: false }
    }
}
