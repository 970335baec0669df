//! Headless game simulator.
//!
//! Plays the real tick logic without a camera or terminal to check:
//! - Enemy spawn rates against the configured chance
//! - Auto-fire cadence
//! - How many enemies a sweeping player shoots down

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
