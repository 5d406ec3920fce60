use serde::{Serialize, Deserialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub executor: ExecutorSettings,
}

/// Tunables for the fan-out executor and its built-in units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorSettings {
    /// Length of one time unit for delay-and-collect batches
    pub time_unit_ms: u64,
    /// Simulated latency of the min-of-partitions and square units
    pub simulated_latency_ms: u64,
    /// Deepest tree `reduce_tree` accepts before failing
    pub max_tree_depth: usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            time_unit_ms: 1000,
            simulated_latency_ms: 1000,
            max_tree_depth: 512,
        }
    }
}

impl ExecutorSettings {
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
