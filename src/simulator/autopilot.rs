//! Scripted player: flaps whenever the bird sinks below its target height.

use crate::scene::{GameStatus, Scene, SceneInput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Target height above the next gap's bottom, as a fraction of the gap.
    pub margin: f64,
}

impl Autopilot {
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    /// Height the bird should not fall below.
    pub fn target_y(&self, scene: &Scene) -> f64 {
        match scene.next_pipe_ahead() {
            Some(pair) => {
                let (bottom, _) = pair.gap_span(&scene.layout);
                bottom + scene.layout.pipe_gap * self.margin
            }
            None => scene.layout.bird_start.y,
        }
    }

    /// Input for the current frame, if any.
    pub fn decide(&self, scene: &Scene) -> Option<SceneInput> {
        match scene.status {
            GameStatus::Idle if scene.interaction_enabled => Some(SceneInput::Tap { touches: 1 }),
            GameStatus::Running => {
                let body = &scene.bird.body;
                let falling = body.velocity.y < 0.0;
                (falling && body.position.y < self.target_y(scene))
                    .then_some(SceneInput::Tap { touches: 1 })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::physics::Vec2;
    use crate::scene::{process_input, PipePair};

    fn running() -> Scene {
        let mut scene = Scene::new(Config::default());
        process_input(&mut scene, SceneInput::Tap { touches: 1 });
        scene
    }

    #[test]
    fn test_idle_starts_game() {
        let scene = Scene::new(Config::default());
        let pilot = Autopilot::new(0.3);
        assert_eq!(pilot.decide(&scene), Some(SceneInput::Tap { touches: 1 }));
    }

    #[test]
    fn test_target_follows_next_gap() {
        let mut scene = running();
        let pilot = Autopilot::new(0.3);
        assert_eq!(pilot.target_y(&scene), scene.layout.bird_start.y);

        scene.pipes.push(PipePair {
            id: 0,
            x: 300.0,
            base_y: 150.0,
            travelled: 0.0,
        });
        // Gap bottom 310, plus 30% of 150
        assert!((pilot.target_y(&scene) - 355.0).abs() < 1e-9);
    }

    #[test]
    fn test_taps_only_when_low_and_falling() {
        let mut scene = running();
        let pilot = Autopilot::new(0.3);
        let target = pilot.target_y(&scene);

        scene.bird.body.position.y = target - 10.0;
        scene.bird.body.velocity = Vec2::new(0.0, -50.0);
        assert!(pilot.decide(&scene).is_some());

        scene.bird.body.velocity = Vec2::new(0.0, 50.0);
        assert!(pilot.decide(&scene).is_none(), "already climbing");

        scene.bird.body.position.y = target + 10.0;
        scene.bird.body.velocity = Vec2::new(0.0, -50.0);
        assert!(pilot.decide(&scene).is_none(), "high enough");
    }

    #[test]
    fn test_no_input_when_over() {
        let mut scene = running();
        crate::scene::enter_over(&mut scene, crate::scene::CrashCause::Ground);
        scene.interaction_enabled = true;
        assert!(Autopilot::new(0.3).decide(&scene).is_none());
    }
}
