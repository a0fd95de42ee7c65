//! Runs the real scene headless, driven by the autopilot.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::constants::PHYSICS_TICK_MS;
use crate::scene::{process_input, tick_scene, Scene};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Run the full batch and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let autopilot = Autopilot::new(config.autopilot_margin);
    let mut runs = Vec::new();

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &autopilot, &mut rng);
        info!(
            run = run_idx + 1,
            of = config.num_runs,
            score = stats.score,
            secs = stats.survival_secs,
            cause = ?stats.crash,
            "run finished"
        );
        runs.push(stats);
    }

    SimReport::from_runs(runs)
}

/// Play one run from idle until a crash or the time cap.
pub fn simulate_single_run<R: Rng>(
    config: &SimConfig,
    autopilot: &Autopilot,
    rng: &mut R,
) -> RunStats {
    let mut scene = Scene::new(config.game.clone());
    let max_steps = (config.max_secs.max(0.0) * 1000.0 / PHYSICS_TICK_MS as f64).ceil() as u64;

    for _ in 0..max_steps {
        if let Some(input) = autopilot.decide(&scene) {
            process_input(&mut scene, input);
        }
        let outcome = tick_scene(&mut scene, PHYSICS_TICK_MS, rng);
        if let Some(cause) = outcome.crashed {
            return RunStats {
                score: scene.score,
                survival_secs: scene.run_time_secs,
                crash: Some(cause),
            };
        }
    }

    debug!(score = scene.score, "run reached time cap");
    RunStats {
        score: scene.score,
        survival_secs: scene.run_time_secs,
        crash: None,
    }
}
