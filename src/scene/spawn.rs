//! Pipe pair spawning, scrolling and recycling.

use super::types::{PipePair, Scene};
use rand::Rng;
use tracing::debug;

/// Pick the lower pipe's centre: uniform integer in `[band, 2 * band)`.
pub fn random_base_y<R: Rng>(band: u32, rng: &mut R) -> f64 {
    let band = band.max(1);
    f64::from(rng.gen_range(0..band) + band)
}

/// Add a new pair just beyond the right edge.
pub fn spawn_pipe_pair<R: Rng>(scene: &mut Scene, rng: &mut R) {
    let layout = scene.layout;
    let pair = PipePair {
        id: scene.next_pipe_id,
        x: layout.width + layout.pipe_width,
        base_y: random_base_y(layout.gap_band(), rng),
        travelled: 0.0,
    };
    scene.next_pipe_id += 1;
    debug!(id = pair.id, base_y = pair.base_y, "pipe pair spawned");
    scene.pipes.push(pair);
}

/// Scroll every pair left and drop the ones that left the screen.
pub fn scroll_pipes(scene: &mut Scene, dt: f64) {
    let dx = scene.config.pipe_speed * scene.moving_speed * dt;
    if dx > 0.0 {
        for pair in &mut scene.pipes {
            pair.x -= dx;
            pair.travelled += dx;
        }
    }
    let travel = scene.layout.pipe_travel();
    scene.pipes.retain(|p| p.travelled < travel);
}

/// Remove every pair.
pub fn clear_pipes(scene: &mut Scene) {
    scene.pipes.clear();
}
