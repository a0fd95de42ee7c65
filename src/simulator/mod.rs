//! Headless balance simulator.
//!
//! Plays the real scene with a scripted autopilot and aggregates scores,
//! survival times and crash causes across many seeded runs.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
