//! Per-tick game logic: steering, spawning, firing, movement and collisions.

use super::types::*;
use crate::constants::*;
use rand::Rng;

/// UI-agnostic commands delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Quit key or the terminal's close signal.
    Quit,
    /// Any other key; ignored.
    Other,
}

/// What happened during one call to [`process_tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub enemy_spawned: bool,
    pub bullet_fired: bool,
    pub kills: u32,
}

/// Apply queued commands. Returns true once the game has stopped.
pub fn handle_commands(state: &mut GameState, commands: &[GameCommand]) -> bool {
    if commands.contains(&GameCommand::Quit) {
        state.run_state = RunState::Stopped;
    }
    !state.is_running()
}

/// Map a normalized nose position onto the ship's pixel range.
///
/// Returns `None` for readings that are not numbers; out-of-range values
/// are clamped to the screen edges.
pub fn nose_to_ship_x(nose_x: f64, dims: &GameDimensions) -> Option<i32> {
    if !nose_x.is_finite() {
        return None;
    }
    let max_x = dims.max_ship_x();
    let x = (nose_x.clamp(0.0, 1.0) * max_x as f64).round() as i32;
    Some(x.clamp(0, max_x))
}

/// Steer the ship from the latest reading. A missing detection keeps the
/// last known position.
pub fn apply_nose_reading(state: &mut GameState, nose_x: Option<f64>) {
    if let Some(x) = nose_x.and_then(|n| nose_to_ship_x(n, &state.dims)) {
        state.ship.x = x;
    }
}

/// Spawn one enemy at the top edge with probability [`ENEMY_SPAWN_CHANCE`].
pub fn maybe_spawn_enemy<R: Rng>(state: &mut GameState, rng: &mut R) -> bool {
    if rng.gen::<f64>() >= ENEMY_SPAWN_CHANCE {
        return false;
    }
    let x = rng.gen_range(0..=state.dims.max_enemy_x());
    state.enemies.push(Enemy { x, y: 0.0 });
    true
}

/// Count down the auto-fire timer and fire from the ship's center when it expires.
pub fn update_auto_fire(state: &mut GameState) -> bool {
    state.shoot_cooldown -= 1;
    if state.shoot_cooldown > 0 {
        return false;
    }
    state.bullets.push(Bullet {
        x: state.ship_center_x(),
        y: state.dims.ship_y() as f64,
    });
    state.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
    true
}

/// Move bullets up and drop the ones that left the top edge.
pub fn advance_bullets(state: &mut GameState) {
    let speed = state.dims.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.y -= speed;
    }
    state.bullets.retain(|b| b.y >= 0.0);
}

/// Move enemies down and drop the ones that passed the bottom edge.
pub fn advance_enemies(state: &mut GameState) {
    let speed = state.dims.enemy_speed;
    let bottom = state.dims.screen_height as f64;
    for enemy in &mut state.enemies {
        enemy.y += speed;
    }
    state.enemies.retain(|e| e.y <= bottom);
}

/// Match bullets against enemies and remove every pair that hit.
///
/// Each enemy takes the first live bullet within range, in collection
/// order. Both sides are marked first and compacted afterwards, so a
/// bullet never scores twice. Returns the explosions to add.
pub fn resolve_collisions(state: &mut GameState) -> Vec<Explosion> {
    let hit_radius = state.dims.hit_radius();
    let mut bullet_dead = vec![false; state.bullets.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut explosions = Vec::new();

    for (ei, enemy) in state.enemies.iter().enumerate() {
        let (cx, cy) = enemy.center(&state.dims);
        for (bi, bullet) in state.bullets.iter().enumerate() {
            if bullet_dead[bi] {
                continue;
            }
            let distance = (bullet.x as f64 - cx).hypot(bullet.y - cy);
            if distance < hit_radius {
                bullet_dead[bi] = true;
                enemy_dead[ei] = true;
                explosions.push(Explosion {
                    x: cx,
                    y: cy,
                    timer: EXPLOSION_TICKS,
                });
                state.score += POINTS_PER_KILL;
                break;
            }
        }
    }

    let mut dead = bullet_dead.into_iter();
    state.bullets.retain(|_| !dead.next().unwrap_or(false));
    let mut dead = enemy_dead.into_iter();
    state.enemies.retain(|_| !dead.next().unwrap_or(false));

    explosions
}

/// Count down explosions and drop the finished ones.
pub fn age_explosions(state: &mut GameState) {
    for explosion in &mut state.explosions {
        explosion.timer = explosion.timer.saturating_sub(1);
    }
    state.explosions.retain(|e| e.timer > 0);
}

/// Advance the simulation by one tick (spawn, fire, move, collide, age).
///
/// Steering from the nose reading happens before this, in
/// [`apply_nose_reading`].
pub fn process_tick<R: Rng>(state: &mut GameState, rng: &mut R) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::default();
    }

    let enemy_spawned = maybe_spawn_enemy(state, rng);
    let bullet_fired = update_auto_fire(state);

    advance_bullets(state);
    advance_enemies(state);

    let fresh = resolve_collisions(state);
    let kills = fresh.len() as u32;

    // New explosions keep their full countdown through the tick they appear in
    age_explosions(state);
    state.explosions.extend(fresh);

    state.tick_count += 1;

    TickOutcome {
        enemy_spawned,
        bullet_fired,
        kills,
    }
}
