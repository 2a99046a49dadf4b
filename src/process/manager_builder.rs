/*!
 * Process Manager Builder
 * Builder pattern for ProcessManager construction
 */

use super::manager::ProcessManager;
use crate::core::config::SimConfig;
use crate::core::limits::DEFAULT_RESOURCE_COUNT;
use log::info;

/// Builder for ProcessManager
pub struct ProcessManagerBuilder {
    resource_count: usize,
}

impl ProcessManagerBuilder {
    /// Create a new ProcessManager builder
    pub fn new() -> Self {
        Self {
            resource_count: DEFAULT_RESOURCE_COUNT,
        }
    }

    /// Take settings from a loaded configuration
    pub fn with_config(mut self, config: &SimConfig) -> Self {
        self.resource_count = config.resource_count;
        self
    }

    /// Number of resources created at each initialization
    pub fn with_resource_count(mut self, count: usize) -> Self {
        self.resource_count = count;
        self
    }

    /// Build the ProcessManager, already initialized
    pub fn build(self) -> ProcessManager {
        let mut manager = ProcessManager::with_resource_count(self.resource_count);
        manager.initialize();
        info!(
            "Process manager built with {} resources",
            self.resource_count
        );
        manager
    }
}

impl Default for ProcessManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
