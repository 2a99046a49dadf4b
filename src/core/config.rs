/*!
 * Simulation Configuration
 * Environment-driven settings for the manager and its logging
 */

use super::errors::SimError;
use super::limits::{DEFAULT_RESOURCE_COUNT, ENV_RESOURCES, ENV_TRACE_JSON, MAX_RESOURCE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    /// Number of resources created at initialization
    pub resource_count: usize,
    /// Emit JSON log lines instead of the compact format
    pub trace_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            resource_count: DEFAULT_RESOURCE_COUNT,
            trace_json: false,
        }
    }
}

impl SimConfig {
    /// Load configuration from the process environment
    ///
    /// Environment variables:
    /// - PRM_RESOURCES: resource count (default: 4)
    /// - PRM_TRACE_JSON: enable JSON log output (default: false)
    pub fn from_env() -> Result<Self, SimError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SimError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_RESOURCES) {
            config.resource_count = raw.trim().parse().map_err(|_| {
                SimError::Configuration(format!("{ENV_RESOURCES} is not a number: {raw:?}"))
            })?;
        }

        if let Some(raw) = lookup(ENV_TRACE_JSON) {
            config.trace_json = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(SimError::Configuration(format!(
                        "{ENV_TRACE_JSON} must be a boolean: {raw:?}"
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self, SimError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            SimError::Configuration(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SimError> {
        if !(1..=MAX_RESOURCE_COUNT).contains(&self.resource_count) {
            return Err(SimError::Configuration(format!(
                "resource count must be between 1 and {MAX_RESOURCE_COUNT}, got {}",
                self.resource_count
            )));
        }
        Ok(())
    }
}
