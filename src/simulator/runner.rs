//! Main simulation runner.
//!
//! Drives the real tick logic with a scripted nose sweep instead of a
//! camera, so the numbers match what a player would see.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::game::{apply_nose_reading, process_tick, GameDimensions, GameState};
use crate::pipeline::synthetic::sweep_position;
use crate::render::{draw_scene, PixelCanvas, RenderSurface};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed + run_idx as u64),
            None => StdRng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Spawned {}, Fired {}, Kills {}, Escaped {}, Score {}",
                run_idx + 1,
                config.num_runs,
                stats.enemies_spawned,
                stats.bullets_fired,
                stats.kills,
                stats.enemies_escaped,
                stats.score
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(config, all_runs)
}

/// Play one game for `ticks_per_run` ticks.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let dims = GameDimensions::new(config.width, config.height);
    let mut state = GameState::new(dims);
    let mut canvas = config
        .render
        .then(|| PixelCanvas::new(config.width, config.height));

    let mut stats = RunStats::default();
    for tick in 0..config.ticks_per_run {
        apply_nose_reading(&mut state, Some(sweep_position(tick, config.sweep_period)));
        let outcome = process_tick(&mut state, rng);

        stats.enemies_spawned += outcome.enemy_spawned as u64;
        stats.bullets_fired += outcome.bullet_fired as u64;
        stats.kills += outcome.kills as u64;

        if let Some(canvas) = canvas.as_mut() {
            draw_scene(&state, canvas, rng);
            // Presenting an off-screen canvas cannot fail
            let _ = canvas.present();
        }
    }

    stats.ticks = state.tick_count;
    stats.score = state.score;
    stats.enemies_escaped = stats
        .enemies_spawned
        .saturating_sub(stats.kills + state.enemies.len() as u64);
    stats.frames_rendered = canvas.map_or(0, |c| c.presented());
    stats
}
