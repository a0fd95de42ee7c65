//! Minimal 2D physics for the scene.
//!
//! One dynamic circular body (the bird) moves under gravity and impulses
//! against a set of static rectangles. Each step reports the colliders the
//! body started touching, so callers see a contact once per encounter.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
