//! Simulation configuration.

use crate::constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::pipeline::synthetic::SWEEP_PERIOD_FRAMES;
use serde::Serialize;

/// Configuration for a headless simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Ticks to simulate per run
    pub ticks_per_run: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Play field size in pixels
    pub width: u32,
    pub height: u32,

    /// Ticks per full left-right-left sweep of the scripted nose
    pub sweep_period: u64,

    /// Rasterize every tick onto an off-screen canvas
    pub render: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            ticks_per_run: 100_000,
            seed: None,
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            sweep_period: SWEEP_PERIOD_FRAMES,
            render: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Short deterministic config for smoke tests
    pub fn quick(seed: u64) -> Self {
        Self {
            ticks_per_run: 3_600,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }
}
