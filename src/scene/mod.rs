//! The scene controller: status machine, scrolling, pipe spawn/recycle,
//! scoring and crash handling.
//!
//! The player taps to leave the idle screen, taps to flap while running,
//! and taps again once the game-over banner has settled to return to idle.

pub mod logic;
pub mod spawn;
pub mod types;

pub use logic::*;
pub use spawn::*;
pub use types::*;
