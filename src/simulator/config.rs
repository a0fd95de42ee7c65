//! Simulation configuration.

use crate::config::Config;

/// Configuration for a batch of headless runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to perform
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i`. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Seconds of scene time before a run is cut off
    pub max_secs: f64,

    /// Scene tuning shared with the interactive game
    pub game: Config,

    /// Keep the autopilot this far above the lower pipe, as a fraction of the gap
    pub autopilot_margin: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_secs: 120.0,
            game: Config::default(),
            autopilot_margin: 0.3,
        }
    }
}

impl SimConfig {
    /// Quick deterministic batch for tests and smoke runs.
    pub fn quick(num_runs: u32, seed: u64, max_secs: f64) -> Self {
        Self {
            num_runs,
            seed: Some(seed),
            max_secs,
            ..Default::default()
        }
    }
}
