//! Network reachability boundary.
//!
//! Map and place features need connectivity; everything else works
//! offline. Reachability is injected as a trait so callers never reach for
//! a process-wide singleton and tests can pin the state.

use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// Env var that forces offline mode (any non-empty value except "0")
pub const OFFLINE_ENV: &str = "TM_OFFLINE";

/// Connectivity state provider
pub trait Reachability {
    fn is_connected(&self) -> bool;
}

/// Reachability driven by configuration and the `TM_OFFLINE` env var
#[derive(Debug, Clone)]
pub struct ConfiguredReachability {
    offline: bool,
}

impl ConfiguredReachability {
    pub fn from_config(config: &NetworkConfig) -> Self {
        let env_offline = std::env::var(OFFLINE_ENV)
            .map(|value| !value.trim().is_empty() && value.trim() != "0")
            .unwrap_or(false);
        Self {
            offline: config.offline || env_offline,
        }
    }
}

impl Reachability for ConfiguredReachability {
    fn is_connected(&self) -> bool {
        !self.offline
    }
}

/// Fixed reachability for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedReachability(pub bool);

impl Reachability for FixedReachability {
    fn is_connected(&self) -> bool {
        self.0
    }
}

/// Fail with `Error::Offline` when the named feature needs connectivity
/// the host does not have.
pub fn require_connectivity(reachability: &dyn Reachability, feature: &str) -> Result<()> {
    if reachability.is_connected() {
        Ok(())
    } else {
        Err(Error::Offline(feature.to_string()))
    }
}
