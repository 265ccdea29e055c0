//! Registry configuration

use lodestone_store::{CachePolicy, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Minimum accepted idle timeout and sweep interval. Sub-second values
/// are rejected to avoid runaway sweep loops.
pub const MIN_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for a managed artifact registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Eviction policy of the backing store
    #[serde(default)]
    pub policy: CachePolicy,
    /// Capacity of the backing store
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Idle time after which an unpinned artifact is swept, in milliseconds
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
    /// Interval between sweep passes, in milliseconds
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
    /// Artifacts pinned at startup, as paths relative to the registry root
    #[serde(default = "default_pinned")]
    pub pinned: Vec<PathBuf>,
}

impl RegistrySettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            policy: CachePolicy::default(),
            capacity: default_capacity(),
            idle_timeout_ms: default_idle_timeout_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
            pinned: default_pinned(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_idle_timeout_ms() -> u64 {
    30 * 60 * 1000
}

fn default_sweep_interval_ms() -> u64 {
    30 * 60 * 1000
}

fn default_pinned() -> Vec<PathBuf> {
    vec![PathBuf::from("config.yml")]
}
