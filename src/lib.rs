//! Flapper - a tap-to-flap side-scroller for the terminal.
//!
//! The scene, physics and simulator are exposed for tests and the headless
//! balance tool; the binary adds the terminal loop on top.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod input;
pub mod logging;
pub mod physics;
pub mod scene;
pub mod simulator;
pub mod ui;
