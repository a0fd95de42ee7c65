//! Scene logic: status transitions, input, fixed-step frame updates.

use super::spawn::{clear_pipes, scroll_pipes, spawn_pipe_pair};
use super::types::*;
use crate::constants::*;
use crate::physics::{Category, Contact, Vec2};
use rand::Rng;
use tracing::{debug, info};

/// Process player input.
pub fn process_input(scene: &mut Scene, input: SceneInput) {
    match input {
        SceneInput::Quit => scene.quit_requested = true,
        SceneInput::Tap { touches } => {
            // Taps are dropped while the game-over banner is still moving
            if !scene.interaction_enabled || touches == 0 {
                return;
            }
            match scene.status {
                GameStatus::Idle => enter_running(scene),
                GameStatus::Running => {
                    for _ in 0..touches {
                        flap(scene);
                    }
                }
                GameStatus::Over => enter_idle(scene),
            }
        }
    }
}

/// Kill vertical motion, then push the bird up.
fn flap(scene: &mut Scene) {
    let body = &mut scene.bird.body;
    body.velocity = Vec2::ZERO;
    body.apply_impulse(Vec2::new(0.0, scene.config.flap_impulse));
}

/// Reset to the hovering bird and an empty pipe field.
pub fn enter_idle(scene: &mut Scene) {
    scene.status = GameStatus::Idle;

    clear_pipes(scene);
    scene.banner = None;
    scene.score_label_visible = false;
    scene.score_pulse.clear();
    scene.flash = None;
    scene.crash_cause = None;

    let bird = &mut scene.bird;
    bird.body.position = scene.layout.bird_start;
    bird.body.velocity = Vec2::ZERO;
    bird.body.dynamic = false;
    bird.rotation = 0.0;
    bird.anim.start();

    scene.moving_speed = 1.0;
    scene.interaction_enabled = true;
    scene.world.reset_contacts();
    info!("scene idle");
}

/// Start a run: gravity on, score reset, pipes spawning.
pub fn enter_running(scene: &mut Scene) {
    scene.status = GameStatus::Running;

    scene.score = 0;
    scene.score_label_visible = true;
    scene.run_time_secs = 0.0;
    scene.runs_played += 1;

    let body = &mut scene.bird.body;
    body.dynamic = true;
    body.collision_mask = Category(WORLD_CATEGORY | PIPE_CATEGORY | EDGE_CATEGORY);

    scene.spawn_timer.start();
    info!(run = scene.runs_played, "run started");
}

/// End the run. The bird keeps falling through pipes onto the ground.
pub fn enter_over(scene: &mut Scene, cause: CrashCause) {
    scene.status = GameStatus::Over;
    scene.crash_cause = Some(cause);

    scene.bird.anim.stop();
    scene.spawn_timer.stop();
    scene.moving_speed = 0.0;
    scene.bird.body.collision_mask = Category(WORLD_CATEGORY | EDGE_CATEGORY);

    scene.banner = Some(GameOverBanner::new(scene.layout.height));
    scene.interaction_enabled = false;
    if scene.config.crash_flash {
        scene.flash = Some(CrashFlash::default());
    }

    scene.best_score = scene.best_score.max(scene.score);
    info!(
        score = scene.score,
        best = scene.best_score,
        ?cause,
        secs = scene.run_time_secs,
        "run over"
    );
}

/// Nose angle for a vertical velocity: dives steeper than it climbs.
pub fn bird_rotation(vy: f64) -> f64 {
    let factor = if vy < 0.0 {
        ROTATION_FALLING_FACTOR
    } else {
        ROTATION_RISING_FACTOR
    };
    (vy * factor).clamp(ROTATION_MIN, ROTATION_MAX)
}

/// Advance the scene. Called from the main loop with wall-clock time.
///
/// `dt_ms` is milliseconds since last call, clamped to 100ms. Internally
/// steps in fixed 16ms increments.
pub fn tick_scene<R: Rng>(scene: &mut Scene, dt_ms: u64, rng: &mut R) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);

    scene.accumulated_time_ms += dt_ms;
    while scene.accumulated_time_ms >= PHYSICS_TICK_MS {
        scene.accumulated_time_ms -= PHYSICS_TICK_MS;
        step_frame(scene, PHYSICS_TICK_MS as f64 / 1000.0, rng, &mut outcome);
    }

    outcome
}

/// Single fixed step of `dt` seconds.
pub fn step_frame<R: Rng>(scene: &mut Scene, dt: f64, rng: &mut R, outcome: &mut TickOutcome) {
    scene.tick_count += 1;
    outcome.steps += 1;

    // 1. Background layers
    scene.ground.advance(dt, scene.moving_speed);
    scene.sky.advance(dt, scene.moving_speed);

    // 2. Pipes scroll and recycle
    scroll_pipes(scene, dt);

    // 3. Spawn schedule
    if scene.status == GameStatus::Running {
        let due = scene
            .spawn_timer
            .advance(dt, scene.config.spawn_interval_secs);
        for _ in 0..due {
            spawn_pipe_pair(scene, rng);
            outcome.pipes_spawned += 1;
        }
        scene.run_time_secs += dt;
    }

    // 4. Physics and contacts
    let colliders = scene.colliders();
    let contacts = scene.world.step(&mut scene.bird.body, &colliders, dt);
    for contact in contacts {
        handle_contact(scene, contact, outcome);
    }

    // 5. Presentation
    scene.bird.rotation = bird_rotation(scene.bird.body.velocity.y);
    scene.bird.anim.advance(dt);
    scene.score_pulse.advance(dt);

    if let Some(banner) = scene.banner.as_mut() {
        banner.advance(dt);
        if banner.is_finished() {
            scene.interaction_enabled = true;
        }
    }

    if let Some(flash) = scene.flash.as_mut() {
        flash.advance(dt);
        if flash.is_finished() {
            scene.flash = None;
        }
    }
}

/// React to a contact-begin. Only a running scene cares.
fn handle_contact(scene: &mut Scene, contact: Contact, outcome: &mut TickOutcome) {
    if scene.status != GameStatus::Running {
        return;
    }

    if contact.category.contains(Category(SCORE_CATEGORY)) {
        scene.score += 1;
        scene.score_pulse.trigger();
        outcome.points_scored += 1;
        debug!(score = scene.score, "pipe passed");
    } else {
        let cause = if contact.category.intersects(Category(PIPE_CATEGORY)) {
            CrashCause::Pipe
        } else {
            CrashCause::Ground
        };
        enter_over(scene, cause);
        outcome.crashed = Some(cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run_for(scene: &mut Scene, secs: f64, rng: &mut ChaCha8Rng) -> TickOutcome {
        let mut total = TickOutcome::default();
        let frames = (secs * 1000.0 / PHYSICS_TICK_MS as f64).round() as u32;
        for _ in 0..frames {
            let o = tick_scene(scene, PHYSICS_TICK_MS, rng);
            total.steps += o.steps;
            total.pipes_spawned += o.pipes_spawned;
            total.points_scored += o.points_scored;
            if total.crashed.is_none() {
                total.crashed = o.crashed;
            }
        }
        total
    }

    fn tap(scene: &mut Scene) {
        process_input(scene, SceneInput::Tap { touches: 1 });
    }

    /// Running scene with a frozen bird and no automatic spawns.
    fn hovering_run() -> Scene {
        let mut scene = Scene::new(Config::default());
        tap(&mut scene);
        scene.bird.body.dynamic = false;
        scene.spawn_timer.stop();
        scene
    }

    #[test]
    fn test_tap_idle_starts_running_without_flap() {
        let mut scene = Scene::new(Config::default());
        tap(&mut scene);
        assert_eq!(scene.status, GameStatus::Running);
        assert!(scene.bird.body.dynamic);
        assert_eq!(scene.bird.body.velocity, Vec2::ZERO);
        assert!(scene.score_label_visible);
        assert!(scene.spawn_timer.active);
        assert_eq!(scene.runs_played, 1);
    }

    #[test]
    fn test_tap_running_resets_velocity_then_impulses() {
        let mut scene = Scene::new(Config::default());
        tap(&mut scene);
        let expected = scene.config.flap_impulse / scene.bird.body.mass;

        scene.bird.body.velocity = Vec2::new(0.0, -300.0);
        tap(&mut scene);
        assert!((scene.bird.body.velocity.y - expected).abs() < 1e-9);

        scene.bird.body.velocity = Vec2::new(0.0, 50.0);
        tap(&mut scene);
        assert!((scene.bird.body.velocity.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_multi_touch_flap_matches_single() {
        let mut scene = Scene::new(Config::default());
        tap(&mut scene);
        process_input(&mut scene, SceneInput::Tap { touches: 3 });
        let expected = scene.config.flap_impulse / scene.bird.body.mass;
        assert!((scene.bird.body.velocity.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_touches_ignored() {
        let mut scene = Scene::new(Config::default());
        process_input(&mut scene, SceneInput::Tap { touches: 0 });
        assert_eq!(scene.status, GameStatus::Idle);
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut scene = Scene::new(Config::default());
        process_input(&mut scene, SceneInput::Quit);
        assert!(scene.quit_requested);
        assert_eq!(scene.status, GameStatus::Idle);
    }

    #[test]
    fn test_idle_bird_hovers_and_ground_scrolls() {
        let mut scene = Scene::new(Config::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let start = scene.bird.body.position;
        let outcome = run_for(&mut scene, 3.0, &mut rng);
        assert_eq!(scene.bird.body.position, start);
        assert!(scene.pipes.is_empty());
        assert_eq!(outcome.pipes_spawned, 0);
        assert!(scene.ground.offset > 0.0);
    }

    #[test]
    fn test_falling_bird_crashes_into_ground() {
        let mut scene = Scene::new(Config::default());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        tap(&mut scene);
        let outcome = run_for(&mut scene, 1.5, &mut rng);

        assert_eq!(outcome.crashed, Some(CrashCause::Ground));
        assert_eq!(scene.status, GameStatus::Over);
        assert_eq!(scene.crash_cause, Some(CrashCause::Ground));
        assert_eq!(scene.moving_speed, 0.0);
        assert!(!scene.spawn_timer.active);
        assert!(!scene.bird.anim.playing);
        assert!(scene.banner.is_some());
    }

    #[test]
    fn test_spawn_cadence() {
        let mut scene = Scene::new(Config::default());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        tap(&mut scene);
        scene.bird.body.dynamic = false;

        let first = tick_scene(&mut scene, PHYSICS_TICK_MS, &mut rng);
        assert_eq!(first.pipes_spawned, 1);

        let next = run_for(&mut scene, 1.9, &mut rng);
        assert_eq!(next.pipes_spawned, 0);
        let later = run_for(&mut scene, 0.2, &mut rng);
        assert_eq!(later.pipes_spawned, 1);
        assert_eq!(scene.pipes.len(), 2);
    }

    #[test]
    fn test_score_counts_once_per_pair() {
        let mut scene = hovering_run();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        // Gap spans 260..410, bird spans about 323..359
        scene.pipes.push(PipePair {
            id: 50,
            x: 250.0,
            base_y: 100.0,
            travelled: 0.0,
        });
        scene.next_pipe_id = 51;

        let outcome = run_for(&mut scene, 5.0, &mut rng);
        assert_eq!(outcome.points_scored, 1);
        assert_eq!(scene.score, 1);
        assert_eq!(scene.status, GameStatus::Running);
        assert!(scene.pipes.is_empty(), "pair recycled after leaving");
    }

    #[test]
    fn test_pipe_hit_ends_run() {
        let mut scene = hovering_run();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // Lower pipe reaches up to 386, covering the bird
        scene.pipes.push(PipePair {
            id: 60,
            x: 250.0,
            base_y: 226.0,
            travelled: 0.0,
        });
        scene.next_pipe_id = 61;

        let outcome = run_for(&mut scene, 3.0, &mut rng);
        assert_eq!(outcome.crashed, Some(CrashCause::Pipe));
        assert_eq!(scene.score, 0);
        assert_eq!(scene.status, GameStatus::Over);
    }

    #[test]
    fn test_pipes_freeze_after_crash() {
        let mut scene = hovering_run();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        scene.pipes.push(PipePair {
            id: 70,
            x: 250.0,
            base_y: 226.0,
            travelled: 0.0,
        });
        scene.next_pipe_id = 71;
        run_for(&mut scene, 3.0, &mut rng);
        let x = scene.pipes[0].x;
        let offset = scene.ground.offset;
        run_for(&mut scene, 1.0, &mut rng);
        assert_eq!(scene.pipes[0].x, x);
        assert_eq!(scene.ground.offset, offset);
    }

    #[test]
    fn test_over_bird_falls_through_pipes_to_ground() {
        let mut scene = hovering_run();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        scene.pipes.push(PipePair {
            id: 80,
            x: 250.0,
            base_y: 226.0,
            travelled: 0.0,
        });
        scene.next_pipe_id = 81;
        run_for(&mut scene, 3.0, &mut rng);
        assert_eq!(scene.status, GameStatus::Over);

        scene.bird.body.dynamic = true;
        run_for(&mut scene, 3.0, &mut rng);
        let ground_top = scene.ground_collider.bounds.max.y;
        let resting = ground_top + scene.bird.body.radius;
        assert!((scene.bird.body.position.y - resting).abs() < 1e-6);
    }

    #[test]
    fn test_over_ignores_taps_until_banner_settles() {
        let mut scene = Scene::new(Config::default());
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        tap(&mut scene);
        run_for(&mut scene, 1.5, &mut rng);
        assert_eq!(scene.status, GameStatus::Over);
        assert!(!scene.interaction_enabled);

        tap(&mut scene);
        assert_eq!(scene.status, GameStatus::Over);

        run_for(&mut scene, 2.1, &mut rng);
        assert!(scene.interaction_enabled);
        tap(&mut scene);
        assert_eq!(scene.status, GameStatus::Idle);
        assert!(scene.pipes.is_empty());
        assert!(scene.banner.is_none());
        assert!(!scene.bird.body.dynamic);
        assert_eq!(scene.bird.body.position, scene.layout.bird_start);
        assert_eq!(scene.moving_speed, 1.0);
    }

    #[test]
    fn test_best_score_kept_across_runs() {
        let mut scene = hovering_run();
        scene.score = 4;
        enter_over(&mut scene, CrashCause::Pipe);
        assert_eq!(scene.best_score, 4);

        enter_idle(&mut scene);
        enter_running(&mut scene);
        assert_eq!(scene.score, 0);
        scene.score = 2;
        enter_over(&mut scene, CrashCause::Ground);
        assert_eq!(scene.best_score, 4);
    }

    #[test]
    fn test_crash_flash_only_when_enabled() {
        let mut scene = hovering_run();
        enter_over(&mut scene, CrashCause::Pipe);
        assert!(scene.flash.is_none());

        let config = Config {
            crash_flash: true,
            ..Config::default()
        };
        let mut scene = Scene::new(config);
        tap(&mut scene);
        enter_over(&mut scene, CrashCause::Pipe);
        assert!(scene.flash.is_some());
    }

    #[test]
    fn test_score_pulse_on_point() {
        let mut scene = hovering_run();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        scene.pipes.push(PipePair {
            id: 90,
            x: 250.0,
            base_y: 100.0,
            travelled: 0.0,
        });
        scene.next_pipe_id = 91;
        let mut pulsed = false;
        for _ in 0..200 {
            let o = tick_scene(&mut scene, PHYSICS_TICK_MS, &mut rng);
            if o.points_scored > 0 {
                pulsed = scene.score_pulse.is_active();
                break;
            }
        }
        assert!(pulsed);
    }

    #[test]
    fn test_rotation_clamped() {
        assert_eq!(bird_rotation(0.0), 0.0);
        assert!((bird_rotation(200.0) - 0.2).abs() < 1e-12);
        assert_eq!(bird_rotation(5000.0), ROTATION_MAX);
        assert!((bird_rotation(-100.0) - (-0.3)).abs() < 1e-12);
        assert_eq!(bird_rotation(-5000.0), ROTATION_MIN);
    }

    #[test]
    fn test_tick_clamps_large_dt() {
        let mut scene = Scene::new(Config::default());
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let outcome = tick_scene(&mut scene, 5_000, &mut rng);
        // 100ms clamp = 6 steps of 16ms with 4ms carried over
        assert_eq!(outcome.steps, 6);
        assert_eq!(scene.accumulated_time_ms, 4);
    }

    #[test]
    fn test_short_tick_accumulates() {
        let mut scene = Scene::new(Config::default());
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(!tick_scene(&mut scene, 10, &mut rng).changed());
        assert!(tick_scene(&mut scene, 10, &mut rng).changed());
    }
}
