pub mod game_common;
pub mod scene_view;

use crate::scene::Scene;
use ratatui::Frame;

/// Draw one frame of the game.
pub fn draw(frame: &mut Frame, scene: &Scene) {
    let size = frame.size();
    scene_view::render_scene(frame, size, scene);
}
