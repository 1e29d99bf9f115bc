//! Cost engine tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_parallel() -> bool {
    true
}

const fn default_max_timeline_entries() -> usize {
    250_000
}

const fn default_max_wall_clock_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Roll projects up in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Most timeline entries a single calculation may price.
    #[serde(default = "default_max_timeline_entries")]
    pub max_timeline_entries: usize,

    /// Wall clock budget for a single calculation, in milliseconds.
    #[serde(default = "default_max_wall_clock_ms")]
    pub max_wall_clock_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            max_timeline_entries: default_max_timeline_entries(),
            max_wall_clock_ms: default_max_wall_clock_ms(),
        }
    }
}

impl EngineConfig {
    pub const fn max_wall_clock(&self) -> Duration {
        Duration::from_millis(self.max_wall_clock_ms)
    }
}
